#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReaderError {
    EndOfBuffer,
    TooManyJumps(usize),
    InvalidResponseCode(u8),
}

impl std::fmt::Display for ReaderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EndOfBuffer => write!(f, "reading out of buffer"),
            Self::TooManyJumps(size) => write!(f, "too many jumps when reading: {size}"),
            Self::InvalidResponseCode(value) => write!(f, "invalid response code: {value}"),
        }
    }
}

/// Cursor over a received DNS message.
///
/// DoH responses arrive as an HTTP body, so the underlying storage is a
/// borrowed slice of whatever length the server sent, not a fixed UDP-sized
/// array.
pub struct PacketReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> PacketReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Current position within the message
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Get a single byte, without changing the position
    fn get(&self, pos: usize) -> Result<u8, ReaderError> {
        self.buf.get(pos).copied().ok_or(ReaderError::EndOfBuffer)
    }

    /// Read a single byte and move the position one step forward
    pub fn read_u8(&mut self) -> Result<u8, ReaderError> {
        let res = self.get(self.pos)?;
        self.pos += 1;

        Ok(res)
    }

    /// Read two bytes, stepping two steps forward
    pub fn read_u16(&mut self) -> Result<u16, ReaderError> {
        let res = ((self.read_u8()? as u16) << 8) | (self.read_u8()? as u16);

        Ok(res)
    }

    /// Read four bytes, stepping four steps forward
    pub fn read_u32(&mut self) -> Result<u32, ReaderError> {
        let res = ((self.read_u16()? as u32) << 16) | (self.read_u16()? as u32);

        Ok(res)
    }

    /// Step over a number of bytes without looking at them, used for rdata
    /// of record types we don't decode.
    pub fn skip(&mut self, steps: usize) -> Result<(), ReaderError> {
        let end = self.pos + steps;
        if end > self.buf.len() {
            return Err(ReaderError::EndOfBuffer);
        }
        self.pos = end;

        Ok(())
    }

    /// Read a qname
    ///
    /// Domain names are encoded as a sequence of length-prefixed labels,
    /// terminated by a zero length. A label whose two most significant bits
    /// are set is instead a pointer to an earlier offset in the message.
    pub fn read_qname(&mut self) -> Result<String, ReaderError> {
        // Jumps move a local position around the message while the shared
        // position only advances past the name as it appears in the stream.
        let mut pos = self.pos;

        let mut jumped = false;
        let max_jumps = 5;
        let mut jumps_performed = 0;

        let mut sections: Vec<String> = Vec::new();

        loop {
            // Messages are untrusted data and a crafted packet can contain a
            // cycle in the jump instructions.
            if jumps_performed > max_jumps {
                return Err(ReaderError::TooManyJumps(max_jumps));
            }

            let len = self.get(pos)?;

            if (len & 0xC0) == 0xC0 {
                // The shared position only needs to step over the two pointer
                // bytes, the rest of the name lives elsewhere.
                if !jumped {
                    self.pos = pos + 2;
                }

                let b2 = self.get(pos + 1)? as u16;
                let offset = (((len as u16) ^ 0xC0) << 8) | b2;
                pos = offset as usize;

                jumped = true;
                jumps_performed += 1;

                continue;
            } else {
                pos += 1;

                if len == 0 {
                    break;
                }

                let end = pos + len as usize;
                let str_buffer = self.buf.get(pos..end).ok_or(ReaderError::EndOfBuffer)?;
                sections.push(String::from_utf8_lossy(str_buffer).to_lowercase());

                pos = end;
            }
        }

        if !jumped {
            self.pos = pos;
        }

        Ok(sections.join("."))
    }
}

#[cfg(test)]
mod tests {
    use super::{PacketReader, ReaderError};

    #[test]
    fn should_read_simple_qname() {
        let data = [3, b'w', b'w', b'w', 3, b'f', b'o', b'o', 3, b'b', b'a', b'r', 0, 42];
        let mut reader = PacketReader::new(&data);
        assert_eq!(reader.read_qname().unwrap(), "www.foo.bar");
        assert_eq!(reader.read_u8().unwrap(), 42);
    }

    #[test]
    fn should_read_qname_with_pointer() {
        // name at offset 0, then a second name pointing back at offset 4
        let data = [
            3, b'w', b'w', b'w', 3, b'f', b'o', b'o', 0, 3, b'a', b'p', b'i', 0xC0, 0x04, 7,
        ];
        let mut reader = PacketReader::new(&data);
        assert_eq!(reader.read_qname().unwrap(), "www.foo");
        assert_eq!(reader.read_qname().unwrap(), "api.foo");
        assert_eq!(reader.read_u8().unwrap(), 7);
    }

    #[test]
    fn should_reject_pointer_cycle() {
        // pointer jumping onto itself forever
        let data = [0xC0, 0x00];
        let mut reader = PacketReader::new(&data);
        assert_eq!(reader.read_qname().unwrap_err(), ReaderError::TooManyJumps(5));
    }

    #[test]
    fn should_reject_truncated_label() {
        let data = [5, b'a', b'b'];
        let mut reader = PacketReader::new(&data);
        assert_eq!(reader.read_qname().unwrap_err(), ReaderError::EndOfBuffer);
    }
}
