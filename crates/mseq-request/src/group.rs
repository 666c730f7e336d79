// group.rs — KinematicGroup: a named, independently controlled set of joints.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::RequestError;

/// Identifier of a kinematic group (e.g., `"two_arm_group"`, `"l_gripper_group"`).
///
/// Owned by the robot configuration; steps and requests hold copies of the
/// identifier, never the group itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct KinematicGroup(String);

impl KinematicGroup {
    /// Create a group identifier. Empty or whitespace-only names are rejected.
    pub fn new(name: impl Into<String>) -> Result<Self, RequestError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(RequestError::EmptyGroupName);
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for KinematicGroup {
    type Error = RequestError;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        Self::new(name)
    }
}

impl From<KinematicGroup> for String {
    fn from(group: KinematicGroup) -> Self {
        group.0
    }
}

impl fmt::Display for KinematicGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for KinematicGroup {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
