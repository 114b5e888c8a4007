//! Relationships between SPDX elements.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! relationship_types {
    ($($variant:ident => $spelling:literal),+ $(,)?) => {
        /// Relationship type vocabulary (SPDX 2.3).
        ///
        /// Spellings outside the vocabulary are kept in `Unknown`.
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum RelationshipType {
            $($variant,)+
            Unknown(String),
        }

        impl RelationshipType {
            #[must_use]
            pub fn from_spelling(spelling: &str) -> Self {
                match spelling.trim() {
                    $($spelling => Self::$variant,)+
                    other => Self::Unknown(other.to_string()),
                }
            }

            #[must_use]
            pub fn as_str(&self) -> &str {
                match self {
                    $(Self::$variant => $spelling,)+
                    Self::Unknown(s) => s,
                }
            }
        }
    };
}

relationship_types! {
    Describes => "DESCRIBES",
    DescribedBy => "DESCRIBED_BY",
    Contains => "CONTAINS",
    ContainedBy => "CONTAINED_BY",
    DependsOn => "DEPENDS_ON",
    DependencyOf => "DEPENDENCY_OF",
    DependencyManifestOf => "DEPENDENCY_MANIFEST_OF",
    BuildDependencyOf => "BUILD_DEPENDENCY_OF",
    DevDependencyOf => "DEV_DEPENDENCY_OF",
    OptionalDependencyOf => "OPTIONAL_DEPENDENCY_OF",
    ProvidedDependencyOf => "PROVIDED_DEPENDENCY_OF",
    TestDependencyOf => "TEST_DEPENDENCY_OF",
    RuntimeDependencyOf => "RUNTIME_DEPENDENCY_OF",
    ExampleOf => "EXAMPLE_OF",
    Generates => "GENERATES",
    GeneratedFrom => "GENERATED_FROM",
    AncestorOf => "ANCESTOR_OF",
    DescendantOf => "DESCENDANT_OF",
    VariantOf => "VARIANT_OF",
    DistributionArtifact => "DISTRIBUTION_ARTIFACT",
    PatchFor => "PATCH_FOR",
    PatchApplied => "PATCH_APPLIED",
    CopyOf => "COPY_OF",
    FileAdded => "FILE_ADDED",
    FileDeleted => "FILE_DELETED",
    FileModified => "FILE_MODIFIED",
    ExpandedFromArchive => "EXPANDED_FROM_ARCHIVE",
    DynamicLink => "DYNAMIC_LINK",
    StaticLink => "STATIC_LINK",
    DataFileOf => "DATA_FILE_OF",
    TestCaseOf => "TEST_CASE_OF",
    BuildToolOf => "BUILD_TOOL_OF",
    DevToolOf => "DEV_TOOL_OF",
    TestOf => "TEST_OF",
    TestToolOf => "TEST_TOOL_OF",
    DocumentationOf => "DOCUMENTATION_OF",
    OptionalComponentOf => "OPTIONAL_COMPONENT_OF",
    MetafileOf => "METAFILE_OF",
    PackageOf => "PACKAGE_OF",
    Amends => "AMENDS",
    PrerequisiteFor => "PREREQUISITE_FOR",
    HasPrerequisite => "HAS_PREREQUISITE",
    RequirementDescriptionFor => "REQUIREMENT_DESCRIPTION_FOR",
    SpecificationFor => "SPECIFICATION_FOR",
    Other => "OTHER",
}

impl RelationshipType {
    #[must_use]
    pub const fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }
}

impl fmt::Display for RelationshipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `element TYPE related-element`, with both ends named by SPDX id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    pub spdx_element_id: String,
    pub relationship_type: RelationshipType,
    /// May also be `NOASSERTION` or `NONE`
    pub related_spdx_element: String,
    pub comment: Option<String>,
    #[serde(skip)]
    pub dangling: bool,
}

impl Relationship {
    pub fn new(
        spdx_element_id: impl Into<String>,
        relationship_type: RelationshipType,
        related_spdx_element: impl Into<String>,
    ) -> Self {
        Self {
            spdx_element_id: spdx_element_id.into(),
            relationship_type,
            related_spdx_element: related_spdx_element.into(),
            comment: None,
            dangling: false,
        }
    }
}
