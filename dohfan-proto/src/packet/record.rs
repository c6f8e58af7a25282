use super::RecordType;
use crate::buffer::{PacketReader, ReaderError};
use std::net::{Ipv4Addr, Ipv6Addr};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[allow(clippy::upper_case_acronyms)]
pub enum Record {
    Unknown {
        domain: String,
        qtype: u16,
        data_len: u16,
        ttl: u32,
    }, // 0
    A {
        domain: String,
        addr: Ipv4Addr,
        ttl: u32,
    }, // 1
    CNAME {
        domain: String,
        host: String,
        ttl: u32,
    }, // 5
    AAAA {
        domain: String,
        addr: Ipv6Addr,
        ttl: u32,
    }, // 28
}

impl Record {
    pub fn rtype(&self) -> RecordType {
        match self {
            Self::Unknown { qtype, .. } => RecordType::Unknown(*qtype),
            Self::A { .. } => RecordType::A,
            Self::CNAME { .. } => RecordType::CNAME,
            Self::AAAA { .. } => RecordType::AAAA,
        }
    }

    pub fn domain(&self) -> &str {
        match self {
            Self::Unknown { domain, .. } => domain,
            Self::A { domain, .. } => domain,
            Self::CNAME { domain, .. } => domain,
            Self::AAAA { domain, .. } => domain,
        }
    }

    pub fn ttl(&self) -> u32 {
        match self {
            Self::Unknown { ttl, .. } => *ttl,
            Self::A { ttl, .. } => *ttl,
            Self::CNAME { ttl, .. } => *ttl,
            Self::AAAA { ttl, .. } => *ttl,
        }
    }

    pub fn read(reader: &mut PacketReader<'_>) -> Result<Record, ReaderError> {
        // NAME a domain name to which this resource record pertains.
        let domain = reader.read_qname()?;

        // TYPE two octets containing one of the RR type codes.
        let qtype_num = reader.read_u16()?;
        let qtype = RecordType::from_num(qtype_num);

        // CLASS two octets which specify the class of the data in the RDATA field.
        let _qclass = reader.read_u16()?;

        // TTL a 32 bit unsigned integer that specifies the time interval (in
        // seconds) that the resource record may be cached before it should be
        // discarded.
        let ttl = reader.read_u32()?;

        // RDLENGTH an unsigned 16 bit integer that specifies the length in
        // octets of the RDATA field.
        let data_len = reader.read_u16()?;

        match qtype {
            RecordType::A => {
                let raw_addr = reader.read_u32()?;
                let addr = Ipv4Addr::from(raw_addr);

                Ok(Record::A { domain, addr, ttl })
            }
            RecordType::AAAA => {
                let addr = Ipv6Addr::new(
                    reader.read_u16()?,
                    reader.read_u16()?,
                    reader.read_u16()?,
                    reader.read_u16()?,
                    reader.read_u16()?,
                    reader.read_u16()?,
                    reader.read_u16()?,
                    reader.read_u16()?,
                );

                Ok(Record::AAAA { domain, addr, ttl })
            }
            RecordType::CNAME => {
                let host = reader.read_qname()?;

                Ok(Record::CNAME { domain, host, ttl })
            }
            RecordType::Unknown(qtype) => {
                reader.skip(data_len as usize)?;

                Ok(Record::Unknown {
                    domain,
                    qtype,
                    data_len,
                    ttl,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Record;
    use crate::buffer::PacketReader;
    use std::net::Ipv4Addr;

    #[test]
    fn should_read_a_record() {
        #[rustfmt::skip]
        let data = [
            3, b'f', b'o', b'o', 3, b'b', b'a', b'r', 0, // name
            0x00, 0x01, // type A
            0x00, 0x01, // class IN
            0x00, 0x00, 0x01, 0x2C, // ttl 300
            0x00, 0x04, // rdlength
            1, 2, 3, 4, // rdata
        ];
        let mut reader = PacketReader::new(&data);
        let record = Record::read(&mut reader).unwrap();
        assert_eq!(
            record,
            Record::A {
                domain: String::from("foo.bar"),
                addr: Ipv4Addr::new(1, 2, 3, 4),
                ttl: 300,
            }
        );
    }

    #[test]
    fn should_skip_unknown_rdata() {
        #[rustfmt::skip]
        let data = [
            3, b'f', b'o', b'o', 0, // name
            0x00, 0x10, // type TXT
            0x00, 0x01, // class IN
            0x00, 0x00, 0x00, 0x3C, // ttl 60
            0x00, 0x03, // rdlength
            b'a', b'b', b'c', // rdata
            42, // next byte after the record
        ];
        let mut reader = PacketReader::new(&data);
        let record = Record::read(&mut reader).unwrap();
        assert_eq!(
            record,
            Record::Unknown {
                domain: String::from("foo"),
                qtype: 16,
                data_len: 3,
                ttl: 60,
            }
        );
        assert_eq!(reader.read_u8().unwrap(), 42);
    }
}
