#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WriterError {
    SingleLabelLength(usize),
}

impl std::fmt::Display for WriterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SingleLabelLength(size) => {
                write!(f, "single label too long when writing: {size}")
            }
        }
    }
}

/// Growable buffer for an outgoing DNS message.
///
/// Only queries are ever written, a single question per message, so there is
/// no need for label compression on the writing side.
#[derive(Debug, Default)]
pub struct PacketWriter {
    buf: Vec<u8>,
}

impl PacketWriter {
    pub fn write_u8(&mut self, val: u8) {
        self.buf.push(val);
    }

    pub fn write_u16(&mut self, val: u16) {
        self.write_u8((val >> 8) as u8);
        self.write_u8((val & 0xFF) as u8);
    }

    fn write_label(&mut self, label: &str) -> Result<(), WriterError> {
        let len = label.len();
        if len > 0x3F {
            return Err(WriterError::SingleLabelLength(len));
        }
        self.write_u8(len as u8);
        for b in label.as_bytes() {
            self.write_u8(*b);
        }
        Ok(())
    }

    pub fn write_qname(&mut self, qname: &str) -> Result<(), WriterError> {
        for label in qname.split('.').filter(|item| !item.is_empty()) {
            self.write_label(label)?;
        }
        self.write_u8(0);

        Ok(())
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::{PacketWriter, WriterError};

    #[test]
    fn should_write_empty_qname() {
        let mut writer = PacketWriter::default();
        writer.write_qname("").unwrap();
        assert_eq!(writer.into_bytes(), vec![0]);
    }

    #[test]
    fn should_write_simple_qname() {
        let mut writer = PacketWriter::default();
        writer.write_qname("www.foo.bar").unwrap();
        assert_eq!(
            writer.into_bytes(),
            vec![3, b'w', b'w', b'w', 3, b'f', b'o', b'o', 3, b'b', b'a', b'r', 0]
        );
    }

    #[test]
    fn should_reject_long_label() {
        let mut writer = PacketWriter::default();
        let label = "a".repeat(64);
        assert_eq!(
            writer.write_qname(&label).unwrap_err(),
            WriterError::SingleLabelLength(64)
        );
    }
}
