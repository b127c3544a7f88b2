//! Randomization method and output placement definitions

use crate::error::StimError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Prerandomization method
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(try_from = "String", into = "String")]
pub enum Method {
    /// Plain shuffle of the whole list, categories ignored
    Unconstrained,
    /// Local-swap label sequence
    #[default]
    PseudoConstrained,
    /// Weighted-sampling label sequence with repair
    PureConstrained,
}

impl Method {
    /// Whether this method needs category labels
    pub fn is_constrained(&self) -> bool {
        !matches!(self, Self::Unconstrained)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unconstrained => "unconstrained",
            Self::PseudoConstrained => "pseudo-constrained",
            Self::PureConstrained => "pure-constrained",
        }
    }
}

impl FromStr for Method {
    type Err = StimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "unconstrained" => Ok(Self::Unconstrained),
            "pseudo" | "pseudo_con" | "pseudo-con" | "pseudo-constrained" | "pseudo_constrained" => {
                Ok(Self::PseudoConstrained)
            }
            "pure" | "pure_con" | "pure-con" | "pure-constrained" | "pure_constrained" => {
                Ok(Self::PureConstrained)
            }
            _ => Err(StimError::invalid(format!(
                "unknown method '{}', expected one of: unconstrained, pseudo-constrained, pure-constrained",
                s
            ))),
        }
    }
}

impl TryFrom<String> for Method {
    type Error = StimError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Method> for String {
    fn from(method: Method) -> Self {
        method.as_str().to_string()
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where derived output directories are placed relative to the stimuli
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(try_from = "String", into = "String")]
pub enum DirType {
    /// Sibling of the stimulus directory (`<stimuli>/../<name>`)
    #[default]
    Parent,
    /// Inside the stimulus directory (`<stimuli>/<name>`)
    Child,
}

impl DirType {
    /// Output directory called `name` for stimuli in `root`
    pub fn resolve(&self, root: &Path, name: &str) -> PathBuf {
        match self {
            Self::Parent => root.join("..").join(name),
            Self::Child => root.join(name),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Parent => "parent",
            Self::Child => "child",
        }
    }
}

impl FromStr for DirType {
    type Err = StimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "parent" => Ok(Self::Parent),
            "child" => Ok(Self::Child),
            _ => Err(StimError::invalid(format!(
                "dir_type must be either \"parent\" or \"child\", got '{}'",
                s
            ))),
        }
    }
}

impl TryFrom<String> for DirType {
    type Error = StimError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<DirType> for String {
    fn from(dir_type: DirType) -> Self {
        dir_type.as_str().to_string()
    }
}

impl fmt::Display for DirType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
