//! Cross-system entity address
//!
//! An `EntityId` names an entity held by some system:
//!
//! ```text
//! [type["." schema]"@"]system"::"address
//! ```
//!
//! - `system`: atom, required (non-zero)
//! - `type`: atom, optional (zero means the system's default type)
//! - `schema`: atom, optional (zero means the type's default schema)
//! - `address`: opaque string, required (non-blank)
//!
//! An address wrapped in `{...}` is a composite address: a canonical JSON
//! object (sorted keys, no nulls, compact). Two logically equal objects
//! always produce byte-identical addresses, which keeps equality and the
//! stable hash meaningful.
//!
//! ```
//! use gdid_core::EntityId;
//!
//! let id: EntityId = "car.vin@dealer::1A8987339HBz0909W874".parse().unwrap();
//! assert_eq!(id.system().to_string(), "dealer");
//! assert_eq!(id.entity_type().to_string(), "car");
//! assert_eq!(id.schema().to_string(), "vin");
//! assert_eq!(id.address(), "1A8987339HBz0909W874");
//! ```

use crate::atom::Atom;
use crate::error::{Error, Result};
use crate::hash::DistributedStableHash;
use crate::limits::Limits;
use crate::shard_key::ShardKey;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value as JsonValue};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Separator between the system segment and the address
pub const SYSTEM_ADDRESS_SEPARATOR: &str = "::";

/// Structured cross-system entity address
///
/// ## Invariants
///
/// - A constructed id always has a non-zero system and a non-blank address
/// - Every atom is valid and a schema is only present with a type, so the
///   text form always parses back to an equal value
/// - `EntityId::EMPTY` is the only unassigned value
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct EntityId {
    system: Atom,
    entity_type: Atom,
    schema: Atom,
    address: String,
}

impl EntityId {
    /// The unassigned id
    pub const EMPTY: EntityId = EntityId {
        system: Atom::ZERO,
        entity_type: Atom::ZERO,
        schema: Atom::ZERO,
        address: String::new(),
    };

    // =========================================================================
    // Constructors
    // =========================================================================

    /// Create from parts
    ///
    /// # Errors
    ///
    /// Returns `Error::Contract` if `system` is zero, any atom is malformed,
    /// `schema` is set without `entity_type`, or `address` is blank.
    pub fn new(
        system: Atom,
        entity_type: Atom,
        schema: Atom,
        address: impl Into<String>,
    ) -> Result<Self> {
        let address = address.into();
        if system.is_zero() {
            return Err(Error::contract("EntityId system must be non-zero"));
        }
        if !(system.is_valid() && entity_type.is_valid() && schema.is_valid()) {
            return Err(Error::contract("EntityId atoms must be valid"));
        }
        // The text form can only carry a schema inside a `type.schema@` prefix
        if entity_type.is_zero() && !schema.is_zero() {
            return Err(Error::contract("EntityId schema requires a type"));
        }
        if address.trim().is_empty() {
            return Err(Error::contract("EntityId address must be non-blank"));
        }
        Ok(EntityId {
            system,
            entity_type,
            schema,
            address,
        })
    }

    /// Create with a composite address built from `value`
    ///
    /// `value` must serialize to a JSON object. The address is the canonical
    /// compact form: keys sorted, null members dropped at every depth.
    ///
    /// # Errors
    ///
    /// Returns `Error::Serialization` if `value` cannot be serialized and
    /// `Error::Contract` if it is not an object or `system` is zero.
    pub fn from_composite<T: Serialize + ?Sized>(
        system: Atom,
        entity_type: Atom,
        schema: Atom,
        value: &T,
    ) -> Result<Self> {
        let json = serde_json::to_value(value)?;
        if !json.is_object() {
            return Err(Error::contract("composite address must be a JSON object"));
        }
        let address = serde_json::to_string(&canonicalize(json))?;
        Self::new(system, entity_type, schema, address)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Owning system
    #[inline]
    pub fn system(&self) -> Atom {
        self.system
    }

    /// Entity type, zero for the default type
    #[inline]
    pub fn entity_type(&self) -> Atom {
        self.entity_type
    }

    /// Schema, zero for the default schema
    #[inline]
    pub fn schema(&self) -> Atom {
        self.schema
    }

    /// Address within the system
    #[inline]
    pub fn address(&self) -> &str {
        &self.address
    }

    /// True when both the system and the address are set
    pub fn is_assigned(&self) -> bool {
        !self.system.is_zero() && !self.address.trim().is_empty()
    }

    /// True when the address looks like a JSON object
    pub fn is_composite_address(&self) -> bool {
        let trimmed = self.address.trim();
        trimmed.starts_with('{') && trimmed.ends_with('}')
    }

    /// Parse the composite address back into a JSON object
    ///
    /// # Errors
    ///
    /// Returns `Error::FieldValidation` if the address is not composite or is
    /// not a JSON object.
    pub fn composite_address(&self) -> Result<Map<String, JsonValue>> {
        if !self.is_composite_address() {
            return Err(address_invalid("address is not composite"));
        }
        match serde_json::from_str::<JsonValue>(&self.address) {
            Ok(JsonValue::Object(map)) => Ok(map),
            Ok(_) => Err(address_invalid("composite address is not a JSON object")),
            Err(e) => Err(address_invalid(format!("composite address is not valid JSON: {}", e))),
        }
    }

    // =========================================================================
    // Validation
    // =========================================================================

    /// Validate with default limits
    pub fn validate(&self) -> Result<()> {
        self.validate_with_limits(&Limits::default())
    }

    /// Validate the address against `limits` and, when composite, check it parses
    ///
    /// These checks are advisory: failures surface as `Error::FieldValidation`
    /// for the caller's validation layer and never affect parsing.
    pub fn validate_with_limits(&self, limits: &Limits) -> Result<()> {
        let len = self.address.len();
        if len > limits.max_address_bytes {
            return Err(address_invalid(format!(
                "address too long: {} bytes exceeds maximum {}",
                len, limits.max_address_bytes
            )));
        }
        if self.is_composite_address() {
            if let Err(err) = self.composite_address() {
                tracing::debug!(
                    system = %self.system,
                    error = %err,
                    "composite address failed validation"
                );
                return Err(err);
            }
        }
        Ok(())
    }

    // =========================================================================
    // Text
    // =========================================================================

    /// Canonical text form; round-trips through `parse`
    pub fn as_string(&self) -> String {
        self.to_string()
    }

    /// Parse `[type[.schema]@]system::address`
    ///
    /// Blank input yields `Some(EntityId::EMPTY)`. Any malformed segment
    /// yields `None`.
    pub fn try_parse(s: &str) -> Option<Self> {
        if s.trim().is_empty() {
            return Some(EntityId::EMPTY);
        }

        // Atoms cannot contain ':' so the first separator is the only one
        // that can end the system segment; later ones belong to the address.
        let ic = s.find(SYSTEM_ADDRESS_SEPARATOR)?;
        if ic == 0 {
            return None;
        }
        let system_segment = &s[..ic];
        let address = &s[ic + SYSTEM_ADDRESS_SEPARATOR.len()..];
        if address.trim().is_empty() {
            return None;
        }

        let (type_schema, system) = match system_segment.split_once('@') {
            Some((left, right)) => (Some(left), right),
            None => (None, system_segment),
        };

        let (entity_type, schema) = match type_schema {
            Some(left) => {
                let (type_part, schema_part) = match left.split_once('.') {
                    Some((t, s)) => (t, Some(s)),
                    None => (left, None),
                };
                let entity_type = non_zero_atom(type_part)?;
                let schema = match schema_part {
                    Some(part) => non_zero_atom(part)?,
                    None => Atom::ZERO,
                };
                (entity_type, schema)
            }
            None => (Atom::ZERO, Atom::ZERO),
        };

        let system = non_zero_atom(system)?;
        Some(EntityId {
            system,
            entity_type,
            schema,
            address: address.to_string(),
        })
    }
}

fn non_zero_atom(token: &str) -> Option<Atom> {
    Atom::try_encode(token).filter(|atom| !atom.is_zero())
}

fn address_invalid(reason: impl Into<String>) -> Error {
    Error::FieldValidation {
        field: "address",
        reason: reason.into(),
    }
}

/// Sort object keys and drop null members, recursively
fn canonicalize(value: JsonValue) -> JsonValue {
    match value {
        JsonValue::Object(map) => {
            let sorted: BTreeMap<String, JsonValue> = map
                .into_iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, v)| (k, canonicalize(v)))
                .collect();
            JsonValue::Object(sorted.into_iter().collect())
        }
        JsonValue::Array(items) => JsonValue::Array(items.into_iter().map(canonicalize).collect()),
        other => other,
    }
}

impl DistributedStableHash for EntityId {
    fn distributed_stable_hash(&self) -> u64 {
        self.system.distributed_stable_hash()
            ^ self.entity_type.distributed_stable_hash().rotate_left(21)
            ^ self.schema.distributed_stable_hash().rotate_left(42)
            ^ ShardKey::for_string(&self.address)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.entity_type.is_zero() {
            write!(f, "{}", self.entity_type)?;
            if !self.schema.is_zero() {
                write!(f, ".{}", self.schema)?;
            }
            f.write_str("@")?;
        }
        write!(f, "{}{}{}", self.system, SYSTEM_ADDRESS_SEPARATOR, self.address)
    }
}

impl FromStr for EntityId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        EntityId::try_parse(s).ok_or_else(|| {
            let err = Error::format("EntityId", s);
            tracing::debug!(error = %err, "rejected EntityId text");
            err
        })
    }
}

impl Serialize for EntityId {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for EntityId {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}
