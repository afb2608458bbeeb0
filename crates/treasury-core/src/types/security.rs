//! Security identifiers and CRSP instrument types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Security identifier (CUSIP, CRSP KYTREASNO, or internal ID).
#[derive(Debug, Clone, Hash, Eq, PartialEq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SecurityId(pub String);

impl SecurityId {
    /// Create a new security ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SecurityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for SecurityId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for SecurityId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// CRSP Treasury instrument type (the `ITYPE` field).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum InstrumentType {
    /// 1: non-callable bond
    Bond,
    /// 2: non-callable note
    Note,
    /// 3: certificate of indebtedness
    Certificate,
    /// 4: bill
    Bill,
    /// 5: callable bond
    CallableBond,
    /// 6: callable note
    CallableNote,
    /// 7: tax anticipation certificate
    TaxAnticipationCertificate,
    /// 8: tax anticipation bill
    TaxAnticipationBill,
    /// 11: inflation-indexed bond
    TipsBond,
    /// 12: inflation-indexed note
    TipsNote,
    /// Any other code
    Other(u8),
}

impl InstrumentType {
    /// Returns the CRSP code.
    #[must_use]
    pub fn code(&self) -> u8 {
        match self {
            Self::Bond => 1,
            Self::Note => 2,
            Self::Certificate => 3,
            Self::Bill => 4,
            Self::CallableBond => 5,
            Self::CallableNote => 6,
            Self::TaxAnticipationCertificate => 7,
            Self::TaxAnticipationBill => 8,
            Self::TipsBond => 11,
            Self::TipsNote => 12,
            Self::Other(code) => *code,
        }
    }

    /// True for the plain notes and bonds (ITYPE 1 or 2) that make up
    /// the maturity portfolios.
    #[must_use]
    pub fn is_note_or_bond(&self) -> bool {
        matches!(self, Self::Bond | Self::Note)
    }
}

impl From<u8> for InstrumentType {
    fn from(code: u8) -> Self {
        match code {
            1 => Self::Bond,
            2 => Self::Note,
            3 => Self::Certificate,
            4 => Self::Bill,
            5 => Self::CallableBond,
            6 => Self::CallableNote,
            7 => Self::TaxAnticipationCertificate,
            8 => Self::TaxAnticipationBill,
            11 => Self::TipsBond,
            12 => Self::TipsNote,
            other => Self::Other(other),
        }
    }
}

impl From<InstrumentType> for u8 {
    fn from(kind: InstrumentType) -> Self {
        kind.code()
    }
}

impl fmt::Display for InstrumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Bond => "Bond",
            Self::Note => "Note",
            Self::Certificate => "Certificate",
            Self::Bill => "Bill",
            Self::CallableBond => "Callable Bond",
            Self::CallableNote => "Callable Note",
            Self::TaxAnticipationCertificate => "Tax Anticipation Certificate",
            Self::TaxAnticipationBill => "Tax Anticipation Bill",
            Self::TipsBond => "TIPS Bond",
            Self::TipsNote => "TIPS Note",
            Self::Other(code) => return write!(f, "ITYPE {code}"),
        };
        write!(f, "{name}")
    }
}
