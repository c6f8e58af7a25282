pub mod record;

pub use record::Record;

use crate::buffer::{PacketReader, PacketWriter, ReaderError, WriterError};

#[derive(PartialEq, Eq, Debug, Clone, Hash, Copy)]
#[allow(clippy::upper_case_acronyms)]
pub enum RecordType {
    Unknown(u16),
    /// a host address
    A, // 1
    /// the canonical name for an alias
    CNAME, // 5
    /// an IPv6 host address
    AAAA, // 28
}

impl RecordType {
    pub fn into_num(self) -> u16 {
        match self {
            RecordType::Unknown(x) => x,
            RecordType::A => 1,
            RecordType::CNAME => 5,
            RecordType::AAAA => 28,
        }
    }

    pub fn from_num(num: u16) -> RecordType {
        match num {
            1 => RecordType::A,
            5 => RecordType::CNAME,
            28 => RecordType::AAAA,
            _ => RecordType::Unknown(num),
        }
    }
}

#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum ResponseCode {
    NoError,         // 0
    FormatError,     // 1
    ServerFailure,   // 2
    NameError,       // 3
    NotImplemented,  // 4
    Refused,         // 5
}

impl TryFrom<u8> for ResponseCode {
    type Error = ReaderError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::NoError),
            1 => Ok(Self::FormatError),
            2 => Ok(Self::ServerFailure),
            3 => Ok(Self::NameError),
            4 => Ok(Self::NotImplemented),
            5 => Ok(Self::Refused),
            other => Err(ReaderError::InvalidResponseCode(other)),
        }
    }
}

/// A single-question DNS query, the only message shape this crate writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub id: u16,
    pub recursion_desired: bool,
    pub domain: String,
    pub rtype: RecordType,
}

impl Query {
    pub fn new<D: Into<String>>(domain: D, rtype: RecordType) -> Self {
        Self {
            id: 0,
            recursion_desired: true,
            domain: domain.into(),
            rtype,
        }
    }

    pub fn encode(&self) -> Result<Vec<u8>, WriterError> {
        let mut writer = PacketWriter::default();

        writer.write_u16(self.id);
        // QR, opcode, AA, TC, RD on one side, RA, Z, RCODE on the other. Only
        // the recursion desired bit is ever set on a query.
        writer.write_u16(if self.recursion_desired { 0x0100 } else { 0x0000 });
        writer.write_u16(1); // question count
        writer.write_u16(0); // answer count
        writer.write_u16(0); // authority count
        writer.write_u16(0); // additional count

        writer.write_qname(&self.domain)?;
        writer.write_u16(self.rtype.into_num());
        writer.write_u16(1); // class IN

        Ok(writer.into_bytes())
    }
}

/// The decoded side of an exchange, reduced to what a resolution needs: the
/// response code and the answer section. Authority and additional records are
/// left unparsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub id: u16,
    pub response_code: ResponseCode,
    pub answers: Vec<Record>,
}

impl Response {
    pub fn decode(bytes: &[u8]) -> Result<Self, ReaderError> {
        let mut reader = PacketReader::new(bytes);

        let id = reader.read_u16()?;
        let flags = reader.read_u16()?;
        let response_code = ResponseCode::try_from((flags & 0x000F) as u8)?;

        let questions = reader.read_u16()?;
        let answer_count = reader.read_u16()?;
        let _authority_count = reader.read_u16()?;
        let _additional_count = reader.read_u16()?;

        // The question section is echoed back by the server, step over it.
        for _ in 0..questions {
            reader.read_qname()?;
            reader.skip(4)?;
        }

        let mut answers = Vec::with_capacity(answer_count as usize);
        for _ in 0..answer_count {
            answers.push(Record::read(&mut reader)?);
        }

        Ok(Self {
            id,
            response_code,
            answers,
        })
    }
}
