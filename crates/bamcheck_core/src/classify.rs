use std::fmt;
use std::path::PathBuf;

use crate::PickedFile;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileRole {
    Data,
    Index,
    Reference,
    ReferenceIndex,
    Region,
}

impl FileRole {
    pub const REQUIRED: [FileRole; 4] = [
        FileRole::Data,
        FileRole::Index,
        FileRole::Reference,
        FileRole::ReferenceIndex,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FileRole::Data => "BAM",
            FileRole::Index => "BAI",
            FileRole::Reference => "FASTA",
            FileRole::ReferenceIndex => "FAI",
            FileRole::Region => "BED",
        }
    }
}

impl fmt::Display for FileRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// File-name suffixes that identify each role. Matching is case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleExtensions {
    pub data: Vec<String>,
    pub index: Vec<String>,
    pub reference: Vec<String>,
    pub reference_index: Vec<String>,
    pub region: Vec<String>,
}

impl Default for RoleExtensions {
    fn default() -> Self {
        Self {
            data: vec![".bam".to_string()],
            index: vec![".bai".to_string()],
            reference: vec![".fa".to_string(), ".fasta".to_string()],
            reference_index: vec![".fai".to_string()],
            region: vec![".bed".to_string()],
        }
    }
}

impl RoleExtensions {
    fn suffixes(&self, role: FileRole) -> &[String] {
        match role {
            FileRole::Data => &self.data,
            FileRole::Index => &self.index,
            FileRole::Reference => &self.reference,
            FileRole::ReferenceIndex => &self.reference_index,
            FileRole::Region => &self.region,
        }
    }

    /// Returns true if `name` ends with one of the suffixes registered for `role`.
    pub fn matches(&self, role: FileRole, name: &str) -> bool {
        let lowered = name.to_ascii_lowercase();
        self.suffixes(role)
            .iter()
            .any(|suffix| lowered.ends_with(&suffix.to_ascii_lowercase()))
    }
}

/// Paths resolved for each role of a confirmed batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedBatch {
    pub data: PathBuf,
    pub index: PathBuf,
    pub reference: PathBuf,
    pub reference_index: PathBuf,
    pub region: Option<PathBuf>,
}

/// Required roles absent from a batch, in canonical order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingRoles(pub Vec<FileRole>);

impl fmt::Display for MissingRoles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels: Vec<&str> = self.0.iter().map(|role| role.label()).collect();
        write!(f, "missing {}", labels.join(", "))
    }
}

/// Picks the first file of the batch for each role.
///
/// Fails if any of the data, index, reference or reference-index roles has
/// no candidate. The region file is optional.
pub fn classify(files: &[PickedFile], extensions: &RoleExtensions) -> Result<ResolvedBatch, MissingRoles> {
    let first = |role: FileRole| {
        files
            .iter()
            .find(|file| extensions.matches(role, &file.name))
            .map(|file| file.path.clone())
    };

    let data = first(FileRole::Data);
    let index = first(FileRole::Index);
    let reference = first(FileRole::Reference);
    let reference_index = first(FileRole::ReferenceIndex);

    match (data, index, reference, reference_index) {
        (Some(data), Some(index), Some(reference), Some(reference_index)) => Ok(ResolvedBatch {
            data,
            index,
            reference,
            reference_index,
            region: first(FileRole::Region),
        }),
        _ => Err(MissingRoles(
            FileRole::REQUIRED
                .into_iter()
                .filter(|role| first(*role).is_none())
                .collect(),
        )),
    }
}
