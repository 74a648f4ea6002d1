//! Work-order permission model
//!
//! The dealer-info endpoint returns a flat list of permission strings. Three of
//! them govern work orders; their combination selects which query template the
//! client uses.
//!
//! ## 权限组合
//! - 申请 (create): 提报工单
//! - 派工 (assign): 分配工单
//! - 执行 (execute): 现场执行
//!
//! 7 non-empty combinations form a [`PermissionClass`]. A user without any of
//! the three rights has no class; query builders treat that as the default
//! case.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Permission string granting work-order creation
pub const WORK_ORDER_CREATE: &str = "WorkOrderCreate";
/// Permission string granting work-order assignment
pub const WORK_ORDER_ASSIGN: &str = "WorkOrderAssign";
/// Permission string granting on-site execution
pub const WORK_ORDER_EXECUTE: &str = "WorkOrderExecute";

/// Immutable bundle of the three work-order rights
///
/// Built once per session and passed explicitly to every query builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionSet {
    can_create: bool,
    can_assign: bool,
    can_execute: bool,
}

impl PermissionSet {
    pub const fn new(can_create: bool, can_assign: bool, can_execute: bool) -> Self {
        Self {
            can_create,
            can_assign,
            can_execute,
        }
    }

    /// Derive the set from the permission strings granted to the user
    pub fn from_permissions<I, S>(permissions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::default();
        for permission in permissions {
            match permission.as_ref() {
                WORK_ORDER_CREATE => set.can_create = true,
                WORK_ORDER_ASSIGN => set.can_assign = true,
                WORK_ORDER_EXECUTE => set.can_execute = true,
                _ => {}
            }
        }
        set
    }

    pub fn can_create(&self) -> bool {
        self.can_create
    }

    pub fn can_assign(&self) -> bool {
        self.can_assign
    }

    pub fn can_execute(&self) -> bool {
        self.can_execute
    }

    /// Whether no work-order right is granted
    pub fn is_empty(&self) -> bool {
        !(self.can_create || self.can_assign || self.can_execute)
    }

    /// Resolve the permission class; `None` when no right is granted
    pub fn class(&self) -> Option<PermissionClass> {
        match (self.can_create, self.can_assign, self.can_execute) {
            (true, false, false) => Some(PermissionClass::CreateOnly),
            (false, true, false) => Some(PermissionClass::AssignOnly),
            (false, false, true) => Some(PermissionClass::ExecuteOnly),
            (true, true, false) => Some(PermissionClass::CreateAssign),
            (true, false, true) => Some(PermissionClass::CreateExecute),
            (false, true, true) => Some(PermissionClass::AssignExecute),
            (true, true, true) => Some(PermissionClass::All),
            (false, false, false) => None,
        }
    }

    /// Stable name of the resolved class (`"none"` for the empty set)
    pub fn class_name(&self) -> &'static str {
        self.class().map(|c| c.as_str()).unwrap_or("none")
    }
}

/// One of the seven non-empty combinations of create/assign/execute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionClass {
    /// 申请权限
    CreateOnly,
    /// 派工权限
    AssignOnly,
    /// 执行权限
    ExecuteOnly,
    /// 申请+派工权限
    CreateAssign,
    /// 申请+执行权限
    CreateExecute,
    /// 派工+执行权限
    AssignExecute,
    /// 申请+派工+执行权限
    All,
}

impl PermissionClass {
    pub const ALL: [PermissionClass; 7] = [
        Self::CreateOnly,
        Self::AssignOnly,
        Self::ExecuteOnly,
        Self::CreateAssign,
        Self::CreateExecute,
        Self::AssignExecute,
        Self::All,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CreateOnly => "create_only",
            Self::AssignOnly => "assign_only",
            Self::ExecuteOnly => "execute_only",
            Self::CreateAssign => "create_assign",
            Self::CreateExecute => "create_execute",
            Self::AssignExecute => "assign_execute",
            Self::All => "all",
        }
    }

    /// The permission set this class stands for
    pub fn permissions(&self) -> PermissionSet {
        match self {
            Self::CreateOnly => PermissionSet::new(true, false, false),
            Self::AssignOnly => PermissionSet::new(false, true, false),
            Self::ExecuteOnly => PermissionSet::new(false, false, true),
            Self::CreateAssign => PermissionSet::new(true, true, false),
            Self::CreateExecute => PermissionSet::new(true, false, true),
            Self::AssignExecute => PermissionSet::new(false, true, true),
            Self::All => PermissionSet::new(true, true, true),
        }
    }

    pub fn has_create(&self) -> bool {
        self.permissions().can_create()
    }

    pub fn has_assign(&self) -> bool {
        self.permissions().can_assign()
    }

    pub fn has_execute(&self) -> bool {
        self.permissions().can_execute()
    }
}

impl fmt::Display for PermissionClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown class name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown permission class: {0}")]
pub struct UnknownPermissionClass(pub String);

impl FromStr for PermissionClass {
    type Err = UnknownPermissionClass;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownPermissionClass(s.to_string()))
    }
}
