//! Credential batch generation: validation, IP derivation and password sampling.

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::charset::CharClassSet;

/// Lowest index accepted for a batch (first usable last octet).
pub const MIN_INDEX: i32 = 1;

/// Highest index accepted for a batch (last usable last octet).
pub const MAX_INDEX: i32 = 254;

/// Longest text a spreadsheet cell can hold, in characters.
pub const MAX_CELL_CHARS: usize = 32_767;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateError {
    #[error("Please select at least one character type.")]
    NoCharacterTypes,

    #[error("Start number cannot be greater than end number.")]
    RangeOrder { start: i32, end: i32 },

    #[error("IP range must be between {MIN_INDEX} and {MAX_INDEX}.")]
    RangeBounds { start: i32, end: i32 },

    #[error("Base name is required.")]
    EmptyBaseName,

    #[error("Password length must be between 1 and {max}.")]
    InvalidPasswordLength { length: usize, max: usize },

    #[error("Invalid base IP '{0}': expected 3 or 4 dot-separated octets.")]
    InvalidBaseIp(String),

    #[error("{field} is too long (at most {max} characters).")]
    FieldTooLong { field: &'static str, max: usize },
}

/// Parameters of one generation call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub base_name: String,
    pub base_ip: String,
    #[serde(default)]
    pub comment: String,
    pub start_number: i32,
    pub end_number: i32,
    pub password_length: usize,
    #[serde(default)]
    pub char_types: CharClassSet,
}

impl GenerateRequest {
    /// Number of records a valid request produces.
    #[must_use]
    pub fn users_count(&self) -> i32 {
        self.end_number - self.start_number + 1
    }
}

/// Tunables that come from configuration rather than from the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorOptions {
    pub max_password_length: usize,
    pub reject_malformed_base_ip: bool,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            max_password_length: 128,
            reject_malformed_base_ip: false,
        }
    }
}

/// One generated hotspot user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialRecord {
    pub username: String,
    pub password: String,
    pub ip_address: String,
    pub comment: String,
}

/// How addresses are derived from `base_ip` for each index.
#[derive(Debug, Clone, PartialEq, Eq)]
enum IpPlan<'a> {
    /// `a.b.c` gets `.{i}` appended.
    Append(&'a str),
    /// `a.b.c.d` walks the last octet upward from `d`.
    Offset { prefix: &'a str, base: u32, start: i32 },
    /// Any other shape is reused unchanged for every record.
    Verbatim(&'a str),
}

impl<'a> IpPlan<'a> {
    fn parse(base_ip: &'a str, start: i32, reject_malformed: bool) -> Result<Self, GenerateError> {
        match base_ip.split('.').count() {
            3 => Ok(Self::Append(base_ip)),
            4 => {
                let (prefix, last) = base_ip
                    .rsplit_once('.')
                    .ok_or_else(|| GenerateError::InvalidBaseIp(base_ip.to_string()))?;
                let base = last
                    .trim()
                    .parse::<u32>()
                    .map_err(|_| GenerateError::InvalidBaseIp(base_ip.to_string()))?;
                Ok(Self::Offset {
                    prefix,
                    base,
                    start,
                })
            }
            _ if reject_malformed => Err(GenerateError::InvalidBaseIp(base_ip.to_string())),
            _ => {
                tracing::warn!(
                    base_ip,
                    "Base IP is neither 3 nor 4 octets; reusing it for every record"
                );
                Ok(Self::Verbatim(base_ip))
            }
        }
    }

    fn address(&self, index: i32) -> String {
        match self {
            Self::Append(base) => format!("{base}.{index}"),
            Self::Offset {
                prefix,
                base,
                start,
            } => {
                let offset = index.abs_diff(*start);
                format!("{prefix}.{}", base.saturating_add(offset))
            }
            Self::Verbatim(base) => (*base).to_string(),
        }
    }
}

/// Checks every precondition without generating anything.
pub fn validate(request: &GenerateRequest, options: &GeneratorOptions) -> Result<(), GenerateError> {
    check(request, options).map(|_| ())
}

fn check<'a>(
    request: &'a GenerateRequest,
    options: &GeneratorOptions,
) -> Result<IpPlan<'a>, GenerateError> {
    if request.char_types.is_empty() {
        return Err(GenerateError::NoCharacterTypes);
    }

    if request.start_number > request.end_number {
        return Err(GenerateError::RangeOrder {
            start: request.start_number,
            end: request.end_number,
        });
    }

    if request.start_number < MIN_INDEX || request.end_number > MAX_INDEX {
        return Err(GenerateError::RangeBounds {
            start: request.start_number,
            end: request.end_number,
        });
    }

    if request.base_name.is_empty() {
        return Err(GenerateError::EmptyBaseName);
    }

    if request.password_length == 0 || request.password_length > options.max_password_length {
        return Err(GenerateError::InvalidPasswordLength {
            length: request.password_length,
            max: options.max_password_length,
        });
    }

    check_cell_lengths(request)?;

    IpPlan::parse(
        &request.base_ip,
        request.start_number,
        options.reject_malformed_base_ip,
    )
}

/// Every free-text field must still fit one cell once an index or octet is
/// appended to it.
fn check_cell_lengths(request: &GenerateRequest) -> Result<(), GenerateError> {
    // ".254" and "254" are the longest suffixes appended to the base values.
    let fields = [
        ("Base name", request.base_name.as_str(), MAX_CELL_CHARS - 3),
        ("Base IP", request.base_ip.as_str(), MAX_CELL_CHARS - 4),
        ("Comment", request.comment.as_str(), MAX_CELL_CHARS),
    ];

    for (field, value, max) in fields {
        if value.chars().count() > max {
            return Err(GenerateError::FieldTooLong { field, max });
        }
    }
    Ok(())
}

/// Produces one record per index in `[start_number, end_number]`, ascending.
pub fn generate<R: Rng>(
    request: &GenerateRequest,
    options: &GeneratorOptions,
    rng: &mut R,
) -> Result<Vec<CredentialRecord>, GenerateError> {
    let ip_plan = check(request, options)?;
    let alphabet = request.char_types.alphabet();

    let records = (request.start_number..=request.end_number)
        .map(|index| CredentialRecord {
            username: format!("{}{index}", request.base_name),
            password: random_password(&alphabet, request.password_length, rng),
            ip_address: ip_plan.address(index),
            comment: request.comment.clone(),
        })
        .collect();

    Ok(records)
}

fn random_password<R: Rng>(alphabet: &[char], length: usize, rng: &mut R) -> String {
    (0..length)
        .map(|_| alphabet[rng.random_range(0..alphabet.len())])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::charset::CharClass;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn request(base_ip: &str, start: i32, end: i32, classes: &[CharClass]) -> GenerateRequest {
        GenerateRequest {
            base_name: "user".to_string(),
            base_ip: base_ip.to_string(),
            comment: "lobby".to_string(),
            start_number: start,
            end_number: end,
            password_length: 4,
            char_types: classes.iter().copied().collect(),
        }
    }

    fn run(req: &GenerateRequest) -> Result<Vec<CredentialRecord>, GenerateError> {
        let mut rng = StdRng::seed_from_u64(42);
        generate(req, &GeneratorOptions::default(), &mut rng)
    }

    #[test]
    fn test_four_octet_base_walks_from_original_octet() {
        let records = run(&request("10.0.0.5", 1, 3, &[CharClass::Numbers])).unwrap();

        let names: Vec<&str> = records.iter().map(|r| r.username.as_str()).collect();
        assert_eq!(names, ["user1", "user2", "user3"]);

        // First record keeps the base octet, then it walks upward.
        let ips: Vec<&str> = records.iter().map(|r| r.ip_address.as_str()).collect();
        assert_eq!(ips, ["10.0.0.5", "10.0.0.6", "10.0.0.7"]);

        for record in &records {
            assert_eq!(record.password.len(), 4);
            assert!(record.password.chars().all(|c| c.is_ascii_digit()));
            assert_eq!(record.comment, "lobby");
        }
    }

    #[test]
    fn test_four_octet_offset_is_relative_to_start() {
        let records = run(&request("192.168.88.100", 10, 12, &[CharClass::Lowercase])).unwrap();
        let ips: Vec<&str> = records.iter().map(|r| r.ip_address.as_str()).collect();
        assert_eq!(ips, ["192.168.88.100", "192.168.88.101", "192.168.88.102"]);
    }

    #[test]
    fn test_three_octet_base_uses_index_as_last_octet() {
        let records = run(&request("172.16.5", 20, 22, &[CharClass::Uppercase])).unwrap();
        let ips: Vec<&str> = records.iter().map(|r| r.ip_address.as_str()).collect();
        assert_eq!(ips, ["172.16.5.20", "172.16.5.21", "172.16.5.22"]);
    }

    #[test]
    fn test_malformed_base_ip_is_reused_verbatim() {
        let records = run(&request("10.0", 1, 3, &[CharClass::Numbers])).unwrap();
        assert!(records.iter().all(|r| r.ip_address == "10.0"));
    }

    #[test]
    fn test_malformed_base_ip_rejected_when_configured() {
        let options = GeneratorOptions {
            reject_malformed_base_ip: true,
            ..GeneratorOptions::default()
        };
        let req = request("10.0", 1, 3, &[CharClass::Numbers]);
        let err = generate(&req, &options, &mut StdRng::seed_from_u64(1)).unwrap_err();
        assert_eq!(err, GenerateError::InvalidBaseIp("10.0".to_string()));
    }

    #[test]
    fn test_non_numeric_fourth_octet_is_rejected() {
        let err = run(&request("10.0.0.x", 1, 3, &[CharClass::Numbers])).unwrap_err();
        assert!(matches!(err, GenerateError::InvalidBaseIp(_)));
    }

    #[test]
    fn test_batch_length_and_unique_ascending_usernames() {
        let records = run(&request("10.1.1", 1, 254, &[CharClass::Lowercase])).unwrap();
        assert_eq!(records.len(), 254);

        for (offset, record) in records.iter().enumerate() {
            assert_eq!(record.username, format!("user{}", offset + 1));
        }
    }

    #[test]
    fn test_passwords_stay_within_selected_alphabet() {
        let classes = [CharClass::Uppercase, CharClass::Special];
        let mut req = request("10.0.0", 1, 50, &classes);
        req.password_length = 16;

        let alphabet = req.char_types.alphabet();
        let records = run(&req).unwrap();
        for record in records {
            assert_eq!(record.password.chars().count(), 16);
            assert!(record.password.chars().all(|c| alphabet.contains(&c)));
        }
    }

    #[test]
    fn test_single_record_batch() {
        let records = run(&request("10.0.0", 254, 254, &[CharClass::Numbers])).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].ip_address, "10.0.0.254");
    }

    #[test]
    fn test_range_order_rejected() {
        let err = run(&request("10.0.0", 10, 5, &[CharClass::Numbers])).unwrap_err();
        assert_eq!(err, GenerateError::RangeOrder { start: 10, end: 5 });
    }

    #[test]
    fn test_range_bounds_rejected() {
        let err = run(&request("10.0.0", 0, 5, &[CharClass::Numbers])).unwrap_err();
        assert!(matches!(err, GenerateError::RangeBounds { .. }));

        let err = run(&request("10.0.0", 1, 255, &[CharClass::Numbers])).unwrap_err();
        assert!(matches!(err, GenerateError::RangeBounds { .. }));
    }

    #[test]
    fn test_empty_char_types_rejected() {
        let err = run(&request("10.0.0", 1, 5, &[])).unwrap_err();
        assert_eq!(err, GenerateError::NoCharacterTypes);
        assert_eq!(err.to_string(), "Please select at least one character type.");
    }

    #[test]
    fn test_password_length_bounds() {
        let mut req = request("10.0.0", 1, 2, &[CharClass::Numbers]);
        req.password_length = 0;
        assert!(matches!(
            run(&req).unwrap_err(),
            GenerateError::InvalidPasswordLength { .. }
        ));

        req.password_length = 129;
        assert!(matches!(
            run(&req).unwrap_err(),
            GenerateError::InvalidPasswordLength { max: 128, .. }
        ));
    }

    #[test]
    fn test_empty_base_name_rejected() {
        let mut req = request("10.0.0", 1, 2, &[CharClass::Numbers]);
        req.base_name = String::new();
        assert_eq!(run(&req).unwrap_err(), GenerateError::EmptyBaseName);

        req.base_name = " ".to_string();
        assert_eq!(run(&req).unwrap()[0].username, " 1");
    }

    #[test]
    fn test_oversized_text_fields_rejected() {
        let mut req = request("10.0.0", 1, 2, &[CharClass::Numbers]);
        req.comment = "c".repeat(MAX_CELL_CHARS);
        assert!(run(&req).is_ok());

        req.comment.push('c');
        assert_eq!(
            run(&req).unwrap_err(),
            GenerateError::FieldTooLong {
                field: "Comment",
                max: MAX_CELL_CHARS
            }
        );

        let mut req = request("10.0.0", 1, 2, &[CharClass::Numbers]);
        req.base_name = "u".repeat(MAX_CELL_CHARS - 2);
        assert!(matches!(
            run(&req).unwrap_err(),
            GenerateError::FieldTooLong { field: "Base name", .. }
        ));
    }

    #[test]
    fn test_missing_char_types_deserialize_as_empty() {
        let req: GenerateRequest = serde_json::from_str(
            r#"{"base_name":"u","base_ip":"10.0.0","start_number":1,"end_number":2,"password_length":4}"#,
        )
        .unwrap();
        assert!(req.char_types.is_empty());
        assert_eq!(run(&req).unwrap_err(), GenerateError::NoCharacterTypes);
    }

    #[test]
    fn test_users_count() {
        assert_eq!(request("10.0.0", 5, 9, &[]).users_count(), 5);
    }

    #[test]
    fn test_validate_matches_generate() {
        let options = GeneratorOptions::default();
        assert!(validate(&request("10.0.0", 1, 2, &[CharClass::Numbers]), &options).is_ok());
        assert_eq!(
            validate(&request("10.0.0", 3, 2, &[CharClass::Numbers]), &options),
            Err(GenerateError::RangeOrder { start: 3, end: 2 })
        );
    }
}
