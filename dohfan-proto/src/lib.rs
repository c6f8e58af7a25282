pub mod buffer;
pub mod packet;

#[cfg(test)]
mod tests {
    use std::net::{Ipv4Addr, Ipv6Addr};

    #[test]
    fn should_read_response_packet() {
        // response to an `example.com` query carrying a mixed answer section
        // with compressed names pointing back at the question
        #[rustfmt::skip]
        let data = [
            0x00, 0x2A, // id
            0x81, 0x80, // response, recursion desired and available
            0x00, 0x01, // 1 question
            0x00, 0x03, // 3 answers
            0x00, 0x00, 0x00, 0x00,
            // question, name at offset 12
            7, b'e', b'x', b'a', b'm', b'p', b'l', b'e', 3, b'c', b'o', b'm', 0,
            0x00, 0x01, 0x00, 0x01,
            // A answer
            0xC0, 0x0C,
            0x00, 0x01, 0x00, 0x01,
            0x00, 0x00, 0x01, 0x2C,
            0x00, 0x04,
            93, 184, 216, 34,
            // AAAA answer
            0xC0, 0x0C,
            0x00, 0x1C, 0x00, 0x01,
            0x00, 0x00, 0x01, 0x2C,
            0x00, 0x10,
            0x26, 0x06, 0x28, 0x00, 0x02, 0x20, 0x00, 0x01,
            0x02, 0x48, 0x18, 0x93, 0x25, 0xC8, 0x19, 0x46,
            // CNAME answer, host reusing the question name
            0xC0, 0x0C,
            0x00, 0x05, 0x00, 0x01,
            0x00, 0x00, 0x00, 0x3C,
            0x00, 0x06,
            3, b'w', b'w', b'w', 0xC0, 0x0C,
        ];

        let response = crate::packet::Response::decode(&data).unwrap();
        assert_eq!(response.id, 42);
        assert_eq!(response.response_code, crate::packet::ResponseCode::NoError);

        assert_eq!(response.answers.len(), 3);
        assert_eq!(
            response.answers[0],
            crate::packet::Record::A {
                domain: String::from("example.com"),
                addr: Ipv4Addr::new(93, 184, 216, 34),
                ttl: 300,
            }
        );
        assert_eq!(
            response.answers[1],
            crate::packet::Record::AAAA {
                domain: String::from("example.com"),
                addr: Ipv6Addr::new(
                    0x2606, 0x2800, 0x0220, 0x0001, 0x0248, 0x1893, 0x25C8, 0x1946
                ),
                ttl: 300,
            }
        );
        assert_eq!(
            response.answers[2],
            crate::packet::Record::CNAME {
                domain: String::from("example.com"),
                host: String::from("www.example.com"),
                ttl: 60,
            }
        );
    }
}
