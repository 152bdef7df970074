//! File modes recorded in tree entries
//!
//! Regular and executable files, symbolic links, directories and gitlinks
//! (submodule commits). Gitlinks are leaves: the change model never descends into them.

#[derive(Debug, Clone, Copy, Eq, Hash, Ord, Default, PartialEq, PartialOrd)]
pub enum FileMode {
    #[default]
    Regular,
    Executable,
}

#[derive(Debug, Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum EntryMode {
    File(FileMode),
    Symlink,
    Directory,
    Gitlink,
}

impl Default for EntryMode {
    fn default() -> Self {
        EntryMode::File(FileMode::Regular)
    }
}

impl EntryMode {
    pub fn as_str(&self) -> &str {
        match self {
            EntryMode::File(FileMode::Regular) => "100644",
            EntryMode::File(FileMode::Executable) => "100755",
            EntryMode::Symlink => "120000",
            EntryMode::Directory => "40000",
            EntryMode::Gitlink => "160000",
        }
    }

    pub fn as_u32(&self) -> u32 {
        match self {
            EntryMode::File(FileMode::Regular) => 0o100644,
            EntryMode::File(FileMode::Executable) => 0o100755,
            EntryMode::Symlink => 0o120000,
            EntryMode::Directory => 0o40000,
            EntryMode::Gitlink => 0o160000,
        }
    }

    pub fn is_tree(&self) -> bool {
        matches!(self, EntryMode::Directory)
    }

    /// Parse the octal mode string found in serialized tree entries.
    ///
    /// Git writes directories as `40000`; older tools pad it to `040000`.
    pub fn from_octal_str(mode: &str) -> anyhow::Result<Self> {
        let mode = u32::from_str_radix(mode, 8)
            .map_err(|_| anyhow::anyhow!("Invalid entry mode: {mode}"))?;

        EntryMode::try_from(mode)
    }
}

impl TryFrom<u32> for EntryMode {
    type Error = anyhow::Error;

    fn try_from(mode: u32) -> anyhow::Result<Self> {
        match mode {
            0o100644 => Ok(EntryMode::File(FileMode::Regular)),
            0o100755 => Ok(EntryMode::File(FileMode::Executable)),
            0o120000 => Ok(EntryMode::Symlink),
            0o40000 => Ok(EntryMode::Directory),
            0o160000 => Ok(EntryMode::Gitlink),
            _ => Err(anyhow::anyhow!("Invalid entry mode: {mode:o}")),
        }
    }
}

impl From<FileMode> for EntryMode {
    fn from(mode: FileMode) -> Self {
        EntryMode::File(mode)
    }
}

impl std::fmt::Display for EntryMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
