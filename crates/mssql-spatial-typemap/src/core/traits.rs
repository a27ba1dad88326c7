//! Core traits for the type-mapping pipeline.
//!
//! - [`TypeMappingSourcePlugin`]: a resolver that may handle a mapping request
//! - [`RelationalTypeMapping`]: the descriptor a plugin produces
//!
//! # Design Patterns
//!
//! - **Chain of Responsibility**: plugins are tried in order until one answers
//! - **Strategy**: each plugin supplies its own resolution rules

use std::any::Any;
use std::fmt;

use crate::error::Result;

use super::clr_type::ClrType;

/// A type-mapping request.
///
/// Either side may be absent: a request can come from an application type
/// alone (model building), a store type name alone (reverse engineering), or
/// both (explicit column annotation).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingInfo {
    /// Requested application type.
    pub clr_type: Option<ClrType>,
    /// Declared column type name, as written in the schema.
    pub store_type_name: Option<String>,
}

impl MappingInfo {
    /// Create a request from both sides.
    pub fn new(clr_type: Option<ClrType>, store_type_name: Option<String>) -> Self {
        Self {
            clr_type,
            store_type_name,
        }
    }

    /// Create a request for an application type only.
    pub fn for_clr_type(clr_type: ClrType) -> Self {
        Self {
            clr_type: Some(clr_type),
            store_type_name: None,
        }
    }

    /// Create a request for a store type name only.
    pub fn for_store_type(store_type_name: impl Into<String>) -> Self {
        Self {
            clr_type: None,
            store_type_name: Some(store_type_name.into()),
        }
    }
}

impl fmt::Display for MappingInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "clr_type={}, store_type={}",
            self.clr_type
                .as_ref()
                .map(ClrType::name)
                .unwrap_or("<none>"),
            self.store_type_name.as_deref().unwrap_or("<none>")
        )
    }
}

/// Descriptor telling the host how an application type is stored in a column.
pub trait RelationalTypeMapping: fmt::Debug + Send + Sync {
    /// Application type this mapping reads and writes.
    fn clr_type(&self) -> &ClrType;

    /// Column type name this mapping targets.
    fn store_type(&self) -> &str;

    /// Access the concrete mapping type.
    fn as_any(&self) -> &dyn Any;
}

/// A resolver registered into the type-mapping pipeline.
///
/// Implementations must be stateless per call: a single instance is shared
/// by every caller for the lifetime of the process.
pub trait TypeMappingSourcePlugin: Send + Sync {
    /// Plugin identifier used in logs and diagnostics.
    fn name(&self) -> &str;

    /// Resolve a mapping request.
    ///
    /// Returns `Ok(None)` when this plugin does not handle the request, so
    /// the next plugin can try. Errors are construction failures and are
    /// passed through to the caller untouched.
    fn find_mapping(&self, info: &MappingInfo) -> Result<Option<Box<dyn RelationalTypeMapping>>>;
}
