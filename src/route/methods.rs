use http::Method;
use smallvec::SmallVec;

use crate::error::InvalidMethods;

/// Separator used between methods in default route names
pub const HTTP_METHOD_SEPARATOR: &str = ":";

/// Inline capacity for method lists; almost every route allows one or two
pub const MAX_INLINE_METHODS: usize = 2;

/// Validated method list storage
pub type MethodVec = SmallVec<[Method; MAX_INLINE_METHODS]>;

/// HTTP methods a route accepts
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AllowedMethods {
    /// Every method is accepted
    #[default]
    Any,
    /// Only the listed methods, uppercased, in declaration order
    Only(MethodVec),
}

impl AllowedMethods {
    /// Validate and normalize a method list.
    ///
    /// `None` means any method. A present list must be non-empty and each entry
    /// must be an HTTP token (`[!#$%&'*+.^_`|~0-9A-Za-z-]+`). Valid entries are
    /// uppercased; duplicates are kept as given.
    pub fn parse(methods: Option<&[&str]>) -> Result<Self, InvalidMethods> {
        let Some(methods) = methods else {
            return Ok(AllowedMethods::Any);
        };
        if methods.is_empty() {
            return Err(InvalidMethods::Empty);
        }
        methods
            .iter()
            .map(|m| parse_method(m))
            .collect::<Result<MethodVec, _>>()
            .map(AllowedMethods::Only)
    }

    #[must_use]
    pub fn is_any(&self) -> bool {
        matches!(self, AllowedMethods::Any)
    }

    /// Case-insensitive membership test
    #[must_use]
    pub fn allows(&self, method: &str) -> bool {
        match self {
            AllowedMethods::Any => true,
            AllowedMethods::Only(list) => list
                .iter()
                .any(|m| m.as_str().eq_ignore_ascii_case(method)),
        }
    }

    /// Whether at least one method is accepted by both sides.
    ///
    /// `Any` on either side always overlaps.
    #[must_use]
    pub fn overlaps(&self, other: &AllowedMethods) -> bool {
        match (self, other) {
            (AllowedMethods::Any, _) | (_, AllowedMethods::Any) => true,
            (AllowedMethods::Only(a), AllowedMethods::Only(b)) => a.iter().any(|m| b.contains(m)),
        }
    }

    /// The methods as a slice, `None` for any
    #[must_use]
    pub fn as_slice(&self) -> Option<&[Method]> {
        match self {
            AllowedMethods::Any => None,
            AllowedMethods::Only(list) => Some(list.as_slice()),
        }
    }

    /// Methods joined with [`HTTP_METHOD_SEPARATOR`], `None` for any
    #[must_use]
    pub fn joined(&self) -> Option<String> {
        self.as_slice().map(|list| {
            list.iter()
                .map(Method::as_str)
                .collect::<Vec<_>>()
                .join(HTTP_METHOD_SEPARATOR)
        })
    }
}

fn parse_method(raw: &str) -> Result<Method, InvalidMethods> {
    // http::Method accepts exactly the RFC 9110 token alphabet
    Method::from_bytes(raw.to_ascii_uppercase().as_bytes())
        .map_err(|_| InvalidMethods::InvalidToken(raw.to_string()))
}
