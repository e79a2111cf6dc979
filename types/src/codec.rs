//! Canonical wire encoding of a [`Token`].
//!
//! ```text
//! version:difficulty:expiration:base64(resource):algorithm:base64(random_seed):counter
//! ```
//!
//! `resource` and `random_seed` use the standard padded base64 alphabet, which
//! never produces the separator. The encoding is what gets hashed, so decoding
//! must reproduce every field, including the seed and counter, or a verifier
//! would hash a different string than the issuer did.

use std::fmt;
use std::str::FromStr;

use base64::display::Base64Display;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::{Algorithm, Timestamp, Token, TokenError};

/// Field separator of the wire format.
pub const SEPARATOR: char = ':';

const FIELD_COUNT: usize = 7;

impl Token {
    /// Canonical wire string. Same as `to_string()`.
    pub fn encode(&self) -> String {
        self.to_string()
    }

    /// Canonical encoding of every field but the counter, separator included.
    ///
    /// Appending the decimal counter yields exactly [`Token::encode`].
    pub fn encode_prefix(&self) -> String {
        let mut prefix = String::with_capacity(64 + self.resource().len() * 2);
        self.write_prefix(&mut prefix)
            .expect("writing to a String cannot fail");
        prefix
    }

    /// Parse a wire string. Same as `str::parse`.
    pub fn decode(s: &str) -> Result<Self, TokenError> {
        s.parse()
    }

    fn write_prefix(&self, out: &mut impl fmt::Write) -> fmt::Result {
        write!(
            out,
            "{}{SEPARATOR}{}{SEPARATOR}{}{SEPARATOR}{}{SEPARATOR}{}{SEPARATOR}{}{SEPARATOR}",
            self.version(),
            self.difficulty(),
            self.expiration().as_nanos(),
            Base64Display::new(self.resource(), &STANDARD),
            self.algorithm(),
            Base64Display::new(self.random_seed(), &STANDARD),
        )
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_prefix(f)?;
        write!(f, "{}", self.counter())
    }
}

impl FromStr for Token {
    type Err = TokenError;

    /// Fields are checked left to right; the first bad one is reported.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = s.split(SEPARATOR).collect();
        if fields.len() != FIELD_COUNT {
            return Err(invalid(format!(
                "expected {FIELD_COUNT} fields, found {}",
                fields.len()
            )));
        }

        let version = fields[0]
            .parse::<u8>()
            .map_err(|_| invalid(format!("invalid version '{}'", fields[0])))?;
        let difficulty = fields[1]
            .parse::<u8>()
            .map_err(|_| invalid(format!("invalid difficulty '{}'", fields[1])))?;
        let expiration = fields[2]
            .parse::<i64>()
            .map_err(|_| invalid(format!("invalid expiration '{}'", fields[2])))?;
        let resource = STANDARD
            .decode(fields[3])
            .map_err(|_| invalid(format!("invalid base64 encoded resource '{}'", fields[3])))?;
        let algorithm = fields[4].parse::<Algorithm>()?;
        let random_seed = STANDARD
            .decode(fields[5])
            .map_err(|_| invalid(format!("invalid base64 encoded random seed '{}'", fields[5])))?;
        let counter = fields[6]
            .parse::<u64>()
            .map_err(|_| invalid(format!("invalid counter '{}'", fields[6])))?;

        Ok(Token::from_parts(
            version,
            difficulty,
            Timestamp::from_nanos(expiration),
            resource,
            algorithm,
            random_seed,
            counter,
        ))
    }
}

fn invalid(reason: String) -> TokenError {
    TokenError::InvalidFormat(reason)
}

impl Serialize for Token {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Token {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let wire = String::deserialize(deserializer)?;
        wire.parse().map_err(de::Error::custom)
    }
}
