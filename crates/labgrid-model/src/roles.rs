//! Semantic column roles and the column-index binding.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Semantic role a table column can play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnRole {
    TestName,
    Result,
    Norm,
    Unit,
}

impl ColumnRole {
    /// Roles in mapping order.
    pub const ALL: [ColumnRole; 4] = [
        ColumnRole::TestName,
        ColumnRole::Result,
        ColumnRole::Norm,
        ColumnRole::Unit,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::TestName => "test_name",
            Self::Result => "result",
            Self::Norm => "norm",
            Self::Unit => "unit",
        }
    }
}

impl fmt::Display for ColumnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Binding from role to column index. Unbound roles read as null fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnRoleMap {
    pub test_name: Option<usize>,
    pub result: Option<usize>,
    pub norm: Option<usize>,
    pub unit: Option<usize>,
}

impl ColumnRoleMap {
    /// Fixed layout used when no header can be recognized:
    /// name, result, norm, unit.
    pub fn positional() -> Self {
        Self {
            test_name: Some(0),
            result: Some(1),
            norm: Some(2),
            unit: Some(3),
        }
    }

    pub fn get(&self, role: ColumnRole) -> Option<usize> {
        match role {
            ColumnRole::TestName => self.test_name,
            ColumnRole::Result => self.result,
            ColumnRole::Norm => self.norm,
            ColumnRole::Unit => self.unit,
        }
    }

    pub fn set(&mut self, role: ColumnRole, index: usize) {
        let slot = match role {
            ColumnRole::TestName => &mut self.test_name,
            ColumnRole::Result => &mut self.result,
            ColumnRole::Norm => &mut self.norm,
            ColumnRole::Unit => &mut self.unit,
        };
        *slot = Some(index);
    }

    pub fn is_bound(&self, role: ColumnRole) -> bool {
        self.get(role).is_some()
    }
}
