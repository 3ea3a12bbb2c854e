//! RouterOS command rendering for a generated batch.

use super::batch::CredentialRecord;

/// Command context every batch is pasted into.
pub const COMMAND_HEADER: &str = "/ip hotspot user";

/// Renders a single ` add ...` line. Values are inserted verbatim.
#[must_use]
pub fn command_line(record: &CredentialRecord) -> String {
    format!(
        " add comment={} address={} name={} password={}",
        record.comment, record.ip_address, record.username, record.password
    )
}

#[must_use]
pub fn command_lines(records: &[CredentialRecord]) -> Vec<String> {
    records.iter().map(command_line).collect()
}

/// Header line followed by one command per record, newline-joined.
#[must_use]
pub fn render(records: &[CredentialRecord]) -> String {
    std::iter::once(COMMAND_HEADER.to_string())
        .chain(records.iter().map(command_line))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, password: &str, ip: &str, comment: &str) -> CredentialRecord {
        CredentialRecord {
            username: name.to_string(),
            password: password.to_string(),
            ip_address: ip.to_string(),
            comment: comment.to_string(),
        }
    }

    #[test]
    fn test_command_line_format() {
        let line = command_line(&record("user1", "a1b2", "10.0.0.1", "lobby"));
        assert_eq!(
            line,
            " add comment=lobby address=10.0.0.1 name=user1 password=a1b2"
        );
    }

    #[test]
    fn test_render_puts_header_first() {
        let records = vec![
            record("user1", "1111", "10.0.0.1", "c"),
            record("user2", "2222", "10.0.0.2", "c"),
        ];
        let text = render(&records);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "/ip hotspot user");
        assert_eq!(lines[1], " add comment=c address=10.0.0.1 name=user1 password=1111");
        assert_eq!(lines[2], " add comment=c address=10.0.0.2 name=user2 password=2222");
        assert!(!text.ends_with('\n'));
    }

    #[test]
    fn test_values_are_not_escaped() {
        let line = command_line(&record("guest 1", "p@ss w\"rd", "10.0.0.9", "floor 2"));
        assert_eq!(
            line,
            " add comment=floor 2 address=10.0.0.9 name=guest 1 password=p@ss w\"rd"
        );
    }

    #[test]
    fn test_render_empty_batch_is_header_only() {
        assert_eq!(render(&[]), COMMAND_HEADER);
        assert!(command_lines(&[]).is_empty());
    }
}
