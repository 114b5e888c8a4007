//! Tag-value serialization.

use crate::model::{
    Annotation, CreationInfo, Document, ExtractedLicense, File, Package, Relationship, Review,
    Snippet,
};
use crate::parsers::Tag;
use std::fmt::{self, Display, Write as _};

const TEXT_OPEN: &str = "<text>";
const TEXT_CLOSE: &str = "</text>";

/// Serialize a document to tag-value text.
///
/// Files owned by a package follow that package so a reader links them
/// back to it; files with no owner come before the first package.
#[must_use]
pub fn write_tag_value(document: &Document) -> String {
    TagValueWriter::new(true).write(document)
}

/// Incremental tag-value writer over a `String` buffer.
#[derive(Debug, Default)]
pub struct TagValueWriter {
    out: String,
    section_comments: bool,
}

impl TagValueWriter {
    #[must_use]
    pub const fn new(section_comments: bool) -> Self {
        Self {
            out: String::new(),
            section_comments,
        }
    }

    /// Write a whole document and return the text.
    #[must_use]
    pub fn write(mut self, document: &Document) -> String {
        self.header(document);
        if let Some(info) = &document.creation_info {
            self.creation_info(info);
        }

        let mut written = vec![false; document.files.len()];
        let unowned: Vec<usize> = document
            .files
            .iter()
            .enumerate()
            .filter(|(_, f)| {
                f.owning_package
                    .as_deref()
                    .map_or(true, |owner| document.package(owner).is_none())
            })
            .map(|(i, _)| i)
            .collect();
        if !unowned.is_empty() {
            self.section("File Information");
            for i in unowned {
                written[i] = true;
                self.file(&document.files[i]);
            }
        }

        if !document.packages.is_empty() {
            self.section("Package Information");
        }
        for package in &document.packages {
            self.package(package);
            if package.spdx_id.is_empty() {
                continue;
            }
            for (i, file) in document.files.iter().enumerate() {
                if !written[i] && file.owning_package.as_deref() == Some(package.spdx_id.as_str()) {
                    written[i] = true;
                    self.file(file);
                }
            }
        }

        self.entities("Snippet Information", &document.snippets, Self::snippet);
        self.entities(
            "Other Licensing Information Detected",
            &document.extracted_licenses,
            Self::extracted_license,
        );
        self.entities("Relationships", &document.relationships, Self::relationship);
        self.entities("Annotations", &document.annotations, Self::annotation);
        self.entities("Reviews", &document.reviews, Self::review);

        self.out
    }

    // ========================================================================
    // Primitives
    // ========================================================================

    fn section(&mut self, title: &str) {
        if !self.out.is_empty() {
            self.out.push('\n');
        }
        if self.section_comments {
            let _ = writeln!(self.out, "## {title}");
        }
    }

    fn entities<T>(&mut self, title: &str, items: &[T], mut write: impl FnMut(&mut Self, &T)) {
        if items.is_empty() {
            return;
        }
        self.section(title);
        for item in items {
            write(self, item);
        }
    }

    /// `Tag: value`; multi-line values are wrapped in `<text>`.
    fn line(&mut self, tag: Tag, value: impl Display) {
        let value = value.to_string();
        if value.contains('\n') {
            self.text(tag, &value);
        } else {
            let _ = writeln!(self.out, "{tag}: {value}");
        }
    }

    /// `Tag: <text>value</text>`
    fn text(&mut self, tag: Tag, value: &str) {
        let _ = writeln!(self.out, "{tag}: {TEXT_OPEN}{value}{TEXT_CLOSE}");
    }

    fn opt_line<T: Display>(&mut self, tag: Tag, value: Option<T>) {
        if let Some(value) = value {
            self.line(tag, value);
        }
    }

    fn opt_text(&mut self, tag: Tag, value: Option<&String>) {
        if let Some(value) = value {
            self.text(tag, value);
        }
    }

    fn each_line<T: Display>(&mut self, tag: Tag, values: &[T]) {
        for value in values {
            self.line(tag, value);
        }
    }

    fn each_text(&mut self, tag: Tag, values: &[String]) {
        for value in values {
            self.text(tag, value);
        }
    }

    fn required(&mut self, tag: Tag, value: &str) {
        if !value.is_empty() {
            self.line(tag, value);
        }
    }

    // ========================================================================
    // Entities
    // ========================================================================

    fn header(&mut self, document: &Document) {
        self.section("Document Information");
        self.required(Tag::SpdxVersion, &document.spdx_version);
        self.required(Tag::DataLicense, &document.data_license);
        self.required(Tag::SpdxId, &document.spdx_id);
        self.required(Tag::DocumentName, &document.name);
        self.required(Tag::DocumentNamespace, &document.namespace);
        for r in &document.external_document_refs {
            self.line(
                Tag::ExternalDocumentRef,
                format_args!("{} {} {}", r.document_ref_id, r.uri, r.checksum),
            );
        }
        self.opt_text(Tag::DocumentComment, document.comment.as_ref());
    }

    fn creation_info(&mut self, info: &CreationInfo) {
        self.section("Creation Information");
        self.each_line(Tag::Creator, &info.creators);
        self.opt_line(Tag::Created, info.created.as_ref());
        self.opt_text(Tag::CreatorComment, info.comment.as_ref());
        self.opt_line(Tag::LicenseListVersion, info.license_list_version.as_ref());
    }

    fn package(&mut self, p: &Package) {
        self.blank_between();
        self.line(Tag::PackageName, &p.name);
        self.required(Tag::SpdxId, &p.spdx_id);
        self.opt_line(Tag::PackageVersion, p.version.as_ref());
        self.opt_line(Tag::PackageFileName, p.file_name.as_ref());
        self.opt_line(Tag::PackageSupplier, p.supplier.as_ref());
        self.opt_line(Tag::PackageOriginator, p.originator.as_ref());
        self.opt_line(Tag::PackageDownloadLocation, p.download_location.as_ref());
        self.opt_line(Tag::FilesAnalyzed, p.files_analyzed);
        if let Some(code) = &p.verification_code {
            self.line(Tag::PackageVerificationCode, VerificationCodeValue(code));
        }
        self.each_line(Tag::PackageChecksum, &p.checksums);
        self.opt_line(Tag::PackageHomePage, p.homepage.as_ref());
        self.opt_text(Tag::PackageSourceInfo, p.source_info.as_ref());
        self.opt_line(Tag::PackageLicenseConcluded, p.license_concluded.as_ref());
        self.each_line(Tag::PackageLicenseInfoFromFiles, &p.license_info_from_files);
        self.opt_line(Tag::PackageLicenseDeclared, p.license_declared.as_ref());
        self.opt_text(Tag::PackageLicenseComments, p.license_comment.as_ref());
        if let Some(copyright) = &p.copyright_text {
            self.copyright(Tag::PackageCopyrightText, copyright);
        }
        self.opt_text(Tag::PackageSummary, p.summary.as_ref());
        self.opt_text(Tag::PackageDescription, p.description.as_ref());
        self.opt_text(Tag::PackageComment, p.comment.as_ref());
        for r in &p.external_refs {
            self.line(
                Tag::ExternalRef,
                format_args!("{} {} {}", r.category, r.ref_type, r.locator),
            );
            self.opt_text(Tag::ExternalRefComment, r.comment.as_ref());
        }
        self.each_text(Tag::PackageAttributionText, &p.attribution_texts);
        self.opt_line(Tag::PrimaryPackagePurpose, p.primary_purpose.as_ref());
        self.opt_line(Tag::BuiltDate, p.built_date.as_ref());
        self.opt_line(Tag::ReleaseDate, p.release_date.as_ref());
        self.opt_line(Tag::ValidUntilDate, p.valid_until_date.as_ref());
    }

    fn file(&mut self, f: &File) {
        self.blank_between();
        self.line(Tag::FileName, &f.name);
        self.required(Tag::SpdxId, &f.spdx_id);
        self.each_line(Tag::FileType, &f.file_types);
        self.each_line(Tag::FileChecksum, &f.checksums);
        self.opt_line(Tag::LicenseConcluded, f.license_concluded.as_ref());
        self.each_line(Tag::LicenseInfoInFile, &f.license_info_in_file);
        self.opt_text(Tag::LicenseComments, f.license_comment.as_ref());
        if let Some(copyright) = &f.copyright_text {
            self.copyright(Tag::FileCopyrightText, copyright);
        }
        self.opt_text(Tag::FileComment, f.comment.as_ref());
        self.opt_text(Tag::FileNotice, f.notice.as_ref());
        self.each_line(Tag::FileContributor, &f.contributors);
        self.each_text(Tag::FileAttributionText, &f.attribution_texts);
    }

    fn snippet(&mut self, s: &Snippet) {
        self.blank_between();
        self.line(Tag::SnippetSpdxId, &s.spdx_id);
        self.opt_line(Tag::SnippetFromFileSpdxId, s.file_spdx_id.as_ref());
        self.opt_line(Tag::SnippetName, s.name.as_ref());
        self.opt_line(Tag::SnippetByteRange, s.byte_range.as_ref());
        self.opt_line(Tag::SnippetLineRange, s.line_range.as_ref());
        self.opt_line(Tag::SnippetLicenseConcluded, s.license_concluded.as_ref());
        self.each_line(Tag::LicenseInfoInSnippet, &s.license_info_in_snippet);
        self.opt_text(Tag::SnippetLicenseComments, s.license_comment.as_ref());
        if let Some(copyright) = &s.copyright_text {
            self.copyright(Tag::SnippetCopyrightText, copyright);
        }
        self.opt_text(Tag::SnippetComment, s.comment.as_ref());
        self.each_text(Tag::SnippetAttributionText, &s.attribution_texts);
    }

    fn extracted_license(&mut self, l: &ExtractedLicense) {
        self.blank_between();
        self.line(Tag::LicenseId, &l.license_id);
        self.opt_text(Tag::ExtractedText, l.extracted_text.as_ref());
        self.opt_line(Tag::LicenseName, l.name.as_ref());
        self.each_line(Tag::LicenseCrossReference, &l.cross_references);
        self.opt_text(Tag::LicenseComment, l.comment.as_ref());
    }

    fn relationship(&mut self, r: &Relationship) {
        self.line(
            Tag::Relationship,
            format_args!(
                "{} {} {}",
                r.spdx_element_id, r.relationship_type, r.related_spdx_element
            ),
        );
        self.opt_text(Tag::RelationshipComment, r.comment.as_ref());
    }

    fn annotation(&mut self, a: &Annotation) {
        self.blank_between();
        self.line(Tag::Annotator, &a.annotator);
        self.opt_line(Tag::AnnotationDate, a.date.as_ref());
        self.opt_line(
            Tag::AnnotationType,
            a.annotation_type.as_ref().map(|t| t.as_str()),
        );
        self.opt_line(Tag::SpdxRef, a.spdx_id.as_ref());
        self.opt_text(Tag::AnnotationComment, a.comment.as_ref());
    }

    fn review(&mut self, r: &Review) {
        self.blank_between();
        self.line(Tag::Reviewer, &r.reviewer);
        self.opt_line(Tag::ReviewDate, r.date.as_ref());
        self.opt_text(Tag::ReviewComment, r.comment.as_ref());
    }

    /// Sentinels stay bare; real copyright text goes in `<text>`.
    fn copyright(&mut self, tag: Tag, value: &crate::model::SpdxValue<String>) {
        match value.value() {
            Some(text) => self.text(tag, text),
            None => self.line(tag, value),
        }
    }

    /// Separate consecutive entities in one section with a blank line.
    fn blank_between(&mut self) {
        if !self.out.is_empty() && !self.out.ends_with("\n\n") && !self.at_section_start() {
            self.out.push('\n');
        }
    }

    fn at_section_start(&self) -> bool {
        self.out
            .trim_end_matches('\n')
            .rsplit('\n')
            .next()
            .is_some_and(|last| last.starts_with("## "))
    }
}

/// `hex` or `hex (excludes: a, b)`
struct VerificationCodeValue<'a>(&'a crate::model::VerificationCode);

impl Display for VerificationCodeValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.value)?;
        if !self.0.excluded_files.is_empty() {
            write!(f, " (excludes: {})", self.0.excluded_files.join(", "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        Checksum, ChecksumAlgorithm, Creator, CreatorKind, RelationshipType, SpdxValue,
        VerificationCode, DOCUMENT_SPDX_ID,
    };

    fn document() -> Document {
        let mut package = Package::new("demo");
        package.spdx_id = "SPDXRef-demo".to_string();
        package.download_location = Some(SpdxValue::NoAssertion);
        package.copyright_text = Some(SpdxValue::Value("Copyright 2024 Demo".to_string()));
        package.verification_code = Some(VerificationCode {
            value: "d6a770ba38583ed4bb4525bd96e50461655d2758".to_string(),
            excluded_files: vec!["./package.spdx".to_string()],
        });

        let mut file = File::new("./src/main.c");
        file.spdx_id = "SPDXRef-main".to_string();
        file.owning_package = Some("SPDXRef-demo".to_string());
        file.checksums.push(Checksum::new(
            ChecksumAlgorithm::Sha1,
            "d6a770ba38583ed4bb4525bd96e50461655d2758",
        ));
        file.comment = Some("first line\nsecond line".to_string());

        Document {
            spdx_version: "SPDX-2.3".to_string(),
            data_license: "CC0-1.0".to_string(),
            spdx_id: DOCUMENT_SPDX_ID.to_string(),
            name: "demo-doc".to_string(),
            namespace: "https://example.com/demo".to_string(),
            creation_info: Some(CreationInfo {
                creators: vec![Creator::new(CreatorKind::Tool, "writer-test")],
                created: Some("2024-01-01T00:00:00Z".to_string()),
                ..CreationInfo::default()
            }),
            packages: vec![package],
            files: vec![file],
            relationships: vec![Relationship::new(
                DOCUMENT_SPDX_ID,
                RelationshipType::Describes,
                "SPDXRef-demo",
            )],
            ..Document::default()
        }
    }

    #[test]
    fn test_file_follows_its_package() {
        let text = write_tag_value(&document());
        let package_at = text.find("PackageName: demo").unwrap();
        let file_at = text.find("FileName: ./src/main.c").unwrap();
        let relationship_at = text.find("Relationship: SPDXRef-DOCUMENT DESCRIBES").unwrap();
        assert!(package_at < file_at);
        assert!(file_at < relationship_at);
    }

    #[test]
    fn test_text_and_sentinel_values() {
        let text = write_tag_value(&document());
        assert!(text.contains("PackageDownloadLocation: NOASSERTION\n"));
        assert!(text.contains("PackageCopyrightText: <text>Copyright 2024 Demo</text>\n"));
        assert!(text.contains("FileComment: <text>first line\nsecond line</text>\n"));
        assert!(text.contains(
            "PackageVerificationCode: d6a770ba38583ed4bb4525bd96e50461655d2758 (excludes: ./package.spdx)\n"
        ));
    }

    #[test]
    fn test_section_comments_optional() {
        let with = TagValueWriter::new(true).write(&document());
        let without = TagValueWriter::new(false).write(&document());
        assert!(with.starts_with("## Document Information\n"));
        assert!(!without.contains("## "));
        assert!(without.starts_with("SPDXVersion: SPDX-2.3\n"));
    }

    #[test]
    fn test_unowned_files_come_first() {
        let mut doc = document();
        let mut loose = File::new("./loose.txt");
        loose.spdx_id = "SPDXRef-loose".to_string();
        doc.files.push(loose);

        let text = write_tag_value(&doc);
        let loose_at = text.find("FileName: ./loose.txt").unwrap();
        let package_at = text.find("PackageName: demo").unwrap();
        assert!(loose_at < package_at);
    }
}
