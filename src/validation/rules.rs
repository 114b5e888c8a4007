//! Validation rules.

use super::{RuleCategory, ValidationIssue};
use crate::config::ValidationConfig;
use crate::model::{
    parse_timestamp, AnnotationType, Checksum, Document, EntityKey, LicenseExpression, LicenseField,
    DOCUMENT_SPDX_ID, NOASSERTION, NONE,
};
use indexmap::IndexMap;
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

static SPDX_VERSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^SPDX-\d+\.\d+$").expect("static regex"));

static SPDX_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^SPDXRef-[A-Za-z0-9.\-]+$").expect("static regex"));

static DOCUMENT_REF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^DocumentRef-[A-Za-z0-9.\-]+$").expect("static regex"));

static LICENSE_REF_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(DocumentRef-[A-Za-z0-9.\-]+:)?LicenseRef-[A-Za-z0-9.\-]+$").expect("static regex")
});

static LOCAL_LICENSE_REF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^LicenseRef-[A-Za-z0-9.\-]+$").expect("static regex"));

static VERIFICATION_CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9a-fA-F]{40}$").expect("static regex"));

const EXPECTED_DATA_LICENSE: &str = "CC0-1.0";

// ============================================================================
// Structural
// ============================================================================

pub(super) fn structural(doc: &Document, out: &mut Vec<ValidationIssue>) {
    let document = EntityKey::Document;
    let rule = RuleCategory::Structural;

    match &doc.creation_info {
        None => out.push(ValidationIssue::error(
            document,
            rule,
            "document has no creation information",
        )),
        Some(info) => {
            if info.creators.is_empty() {
                out.push(ValidationIssue::error(
                    EntityKey::CreationInfo,
                    rule,
                    "creation information needs at least one creator",
                ));
            }
            if info.created.is_none() {
                out.push(ValidationIssue::error(
                    EntityKey::CreationInfo,
                    rule,
                    "creation information has no Created timestamp",
                ));
            }
        }
    }

    if doc.spdx_version.is_empty() {
        out.push(ValidationIssue::error(document, rule, "SPDXVersion is missing"));
    } else if !SPDX_VERSION_RE.is_match(&doc.spdx_version) {
        out.push(ValidationIssue::error(
            document,
            rule,
            format!("SPDXVersion '{}' is not of the form SPDX-M.N", doc.spdx_version),
        ));
    }

    if doc.data_license.is_empty() {
        out.push(ValidationIssue::error(document, rule, "DataLicense is missing"));
    } else if doc.data_license != EXPECTED_DATA_LICENSE {
        out.push(ValidationIssue::warning(
            document,
            rule,
            format!(
                "DataLicense is '{}', expected {EXPECTED_DATA_LICENSE}",
                doc.data_license
            ),
        ));
    }

    if doc.spdx_id != DOCUMENT_SPDX_ID {
        out.push(ValidationIssue::error(
            document,
            rule,
            format!(
                "document SPDXID is '{}', expected {DOCUMENT_SPDX_ID}",
                doc.spdx_id
            ),
        ));
    }
    if doc.name.is_empty() {
        out.push(ValidationIssue::error(document, rule, "DocumentName is missing"));
    }
    if doc.namespace.is_empty() {
        out.push(ValidationIssue::error(
            document,
            rule,
            "DocumentNamespace is missing",
        ));
    }
}

// ============================================================================
// Identifiers
// ============================================================================

pub(super) fn identifiers(doc: &Document, out: &mut Vec<ValidationIssue>) {
    let rule = RuleCategory::Identifier;

    let mut declared: IndexMap<&str, Vec<EntityKey>> = IndexMap::new();
    for (key, id) in doc.declared_ids() {
        declared.entry(id).or_default().push(key);
    }

    // Missing ids are not in declared_ids()
    for (i, p) in doc.packages.iter().enumerate() {
        if p.spdx_id.is_empty() {
            out.push(ValidationIssue::error(
                EntityKey::Package(i),
                rule,
                format!("package '{}' has no SPDXID", p.name),
            ));
        }
    }
    for (i, f) in doc.files.iter().enumerate() {
        if f.spdx_id.is_empty() {
            out.push(ValidationIssue::error(
                EntityKey::File(i),
                rule,
                format!("file '{}' has no SPDXID", f.name),
            ));
        }
    }

    for (id, owners) in &declared {
        for key in owners {
            if *key != EntityKey::Document && !SPDX_ID_RE.is_match(id) {
                out.push(ValidationIssue::error(
                    key,
                    rule,
                    format!("SPDXID '{id}' does not match SPDXRef-[A-Za-z0-9.-]+"),
                ));
            }
        }
    }

    for (id, owners) in &declared {
        if owners.len() > 1 {
            let locations: Vec<String> = owners.iter().map(ToString::to_string).collect();
            out.push(ValidationIssue::error(
                owners[0],
                rule,
                format!(
                    "SPDXID '{id}' is declared {} times: {}",
                    owners.len(),
                    locations.join(", ")
                ),
            ));
        }
    }

    let known: HashSet<&str> = declared.keys().copied().collect();
    let resolves = |target: &str| -> bool {
        known.contains(target)
            || target.split_once(':').is_some_and(|(document_ref, _)| {
                document_ref.starts_with("DocumentRef-") && doc.has_external_document(document_ref)
            })
    };
    let mut report = |key: EntityKey, message: String| {
        out.push(ValidationIssue::error(key, rule, message));
    };
    let undeclared = |what: &str, target: &str| format!("{what} '{target}' is not declared in this document");

    for (i, f) in doc.files.iter().enumerate() {
        if let Some(owner) = f.owning_package.as_deref() {
            if !resolves(owner) {
                report(EntityKey::File(i), undeclared("owning package", owner));
            }
        }
    }
    for (i, s) in doc.snippets.iter().enumerate() {
        match s.file_spdx_id.as_deref() {
            Some(file) if !resolves(file) => {
                report(EntityKey::Snippet(i), undeclared("snippet file", file));
            }
            Some(_) => {}
            None => report(
                EntityKey::Snippet(i),
                "snippet has no SnippetFromFileSPDXID".to_string(),
            ),
        }
    }
    for (i, r) in doc.relationships.iter().enumerate() {
        let key = EntityKey::Relationship(i);
        if !resolves(&r.spdx_element_id) {
            report(key, undeclared("relationship element", &r.spdx_element_id));
        }
        let target = r.related_spdx_element.as_str();
        if target != NOASSERTION && target != NONE && !resolves(target) {
            report(key, undeclared("related element", target));
        }
    }
    for (i, a) in doc.annotations.iter().enumerate() {
        if let Some(subject) = a.spdx_id.as_deref() {
            if !resolves(subject) {
                report(EntityKey::Annotation(i), undeclared("annotated element", subject));
            }
        }
    }
}

// ============================================================================
// Entity-local rules: format, license, enumeration
// ============================================================================

/// Issues for one entity, in rule order
pub(super) fn entity_issues(
    doc: &Document,
    key: EntityKey,
    config: &ValidationConfig,
) -> Vec<ValidationIssue> {
    let mut format = Vec::new();
    let mut license = Vec::new();
    let mut enumeration = Vec::new();
    let ctx = EntityContext { doc, key, config };

    match key {
        EntityKey::Document => {
            for r in &doc.external_document_refs {
                if !DOCUMENT_REF_RE.is_match(&r.document_ref_id) {
                    format.push(ctx.error(
                        RuleCategory::Format,
                        format!(
                            "external document reference id '{}' does not match DocumentRef-[A-Za-z0-9.-]+",
                            r.document_ref_id
                        ),
                    ));
                }
                ctx.checksum(&r.checksum, &mut format, &mut enumeration);
            }
        }
        EntityKey::CreationInfo => {
            if let Some(created) = doc.creation_info.as_ref().and_then(|c| c.created.as_deref()) {
                ctx.timestamp("Created", created, &mut format);
            }
        }
        EntityKey::Package(i) => {
            let p = &doc.packages[i];
            for checksum in &p.checksums {
                ctx.checksum(checksum, &mut format, &mut enumeration);
            }
            for (tag, date) in p.dates() {
                ctx.timestamp(tag, date, &mut format);
            }
            if let Some(code) = &p.verification_code {
                if !VERIFICATION_CODE_RE.is_match(&code.value) {
                    format.push(ctx.error(
                        RuleCategory::Format,
                        format!(
                            "verification code '{}' is not 40 hexadecimal characters",
                            code.value
                        ),
                    ));
                }
            }
            for (tag, field) in p.license_fields() {
                ctx.license_field(tag, field, &mut license, &mut enumeration);
            }
        }
        EntityKey::File(i) => {
            let f = &doc.files[i];
            for checksum in &f.checksums {
                ctx.checksum(checksum, &mut format, &mut enumeration);
            }
            for (tag, field) in f.license_fields() {
                ctx.license_field(tag, field, &mut license, &mut enumeration);
            }
            for file_type in f.file_types.iter().filter(|t| !t.is_known()) {
                enumeration.push(ctx.warning(
                    RuleCategory::Enumeration,
                    format!("unknown file type '{file_type}'"),
                ));
            }
        }
        EntityKey::Snippet(i) => {
            for (tag, field) in doc.snippets[i].license_fields() {
                ctx.license_field(tag, field, &mut license, &mut enumeration);
            }
        }
        EntityKey::ExtractedLicense(i) => {
            let id = &doc.extracted_licenses[i].license_id;
            if !LOCAL_LICENSE_REF_RE.is_match(id) {
                license.push(ctx.error(
                    RuleCategory::License,
                    format!("extracted license id '{id}' must be LicenseRef-[A-Za-z0-9.-]+"),
                ));
            }
        }
        EntityKey::Relationship(i) => {
            let r = &doc.relationships[i];
            if !r.relationship_type.is_known() {
                enumeration.push(ctx.warning(
                    RuleCategory::Enumeration,
                    format!("unknown relationship type '{}'", r.relationship_type),
                ));
            }
        }
        EntityKey::Annotation(i) => {
            let a = &doc.annotations[i];
            if let Some(date) = a.date.as_deref() {
                ctx.timestamp("AnnotationDate", date, &mut format);
            }
            if let Some(kind) = a.annotation_type.as_ref() {
                if matches!(kind, AnnotationType::Unknown(_)) {
                    enumeration.push(ctx.warning(
                        RuleCategory::Enumeration,
                        format!("unknown annotation type '{}'", kind.as_str()),
                    ));
                }
            }
        }
        EntityKey::Review(i) => {
            if let Some(date) = doc.reviews[i].date.as_deref() {
                ctx.timestamp("ReviewDate", date, &mut format);
            }
        }
    }

    format.extend(license);
    format.extend(enumeration);
    format
}

struct EntityContext<'a> {
    doc: &'a Document,
    key: EntityKey,
    config: &'a ValidationConfig,
}

impl EntityContext<'_> {
    fn error(&self, rule: RuleCategory, message: String) -> ValidationIssue {
        ValidationIssue::error(self.key, rule, message)
    }

    fn warning(&self, rule: RuleCategory, message: String) -> ValidationIssue {
        ValidationIssue::warning(self.key, rule, message)
    }

    fn checksum(
        &self,
        checksum: &Checksum,
        format: &mut Vec<ValidationIssue>,
        enumeration: &mut Vec<ValidationIssue>,
    ) {
        if let Some(problem) = checksum.digest_problem() {
            format.push(self.error(RuleCategory::Format, problem));
        }
        if !checksum.algorithm.is_known() {
            enumeration.push(self.warning(
                RuleCategory::Enumeration,
                format!("unknown checksum algorithm '{}'", checksum.algorithm),
            ));
        }
    }

    fn timestamp(&self, tag: &str, value: &str, format: &mut Vec<ValidationIssue>) {
        if parse_timestamp(value).is_none() {
            format.push(self.error(
                RuleCategory::Format,
                format!("{tag} '{value}' is not an ISO-8601 UTC timestamp (YYYY-MM-DDThh:mm:ssZ)"),
            ));
        }
    }

    fn license_field(
        &self,
        tag: &str,
        field: &LicenseField,
        license: &mut Vec<ValidationIssue>,
        enumeration: &mut Vec<ValidationIssue>,
    ) {
        let expr = match field {
            LicenseField::Unparseable { error, .. } => {
                license.push(self.error(RuleCategory::License, format!("{tag}: {error}")));
                return;
            }
            LicenseField::NoAssertion | LicenseField::None => return,
            LicenseField::Expression(expr) => expr,
        };

        for atom in expr.atoms() {
            match atom {
                LicenseExpression::LicenseRef(id) => {
                    if !LICENSE_REF_RE.is_match(id) {
                        license.push(self.error(
                            RuleCategory::License,
                            format!("{tag}: '{id}' is not a valid license reference"),
                        ));
                    } else if id.starts_with("LicenseRef-")
                        && !self
                            .doc
                            .extracted_licenses
                            .iter()
                            .any(|l| &l.license_id == id)
                    {
                        license.push(self.warning(
                            RuleCategory::License,
                            format!("{tag}: '{id}' has no extracted licensing info"),
                        ));
                    }
                }
                LicenseExpression::LicenseId(id) if self.config.check_license_list => {
                    if spdx::license_id(id.trim_end_matches('+')).is_none() {
                        enumeration.push(self.warning(
                            RuleCategory::Enumeration,
                            format!("{tag}: '{id}' is not on the SPDX license list"),
                        ));
                    }
                }
                _ => {}
            }
        }

        if self.config.check_license_list {
            for exception in expr.exceptions() {
                if spdx::exception_id(exception).is_none() {
                    enumeration.push(self.warning(
                        RuleCategory::Enumeration,
                        format!("{tag}: '{exception}' is not on the SPDX exception list"),
                    ));
                }
            }
        }
    }
}
