/// The product form model
///
/// Composes the scalar fields, the size rows and the image staging into
/// one unit the dashboard and edit screens mutate, validate and serialize.
/// The form never blocks mutation; validation is advisory and only gates
/// submission.

use std::path::PathBuf;
use thiserror::Error;

use super::data::Product;
use super::image::ImageStaging;
use super::sizes::SizeList;

/// One constraint a form violates at submission time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    #[error("title must not be empty")]
    EmptyTitle,

    #[error("description must not be empty")]
    EmptyDescription,

    /// Create only; an edit may submit without a new image to keep the
    /// existing one.
    #[error("an image must be selected")]
    MissingImage,

    /// Create only; an edit may submit the fetched (possibly empty) list.
    #[error("at least one size is required")]
    NoSizes,
}

/// The serialized form, ready for the gateway to turn into a multipart
/// request. Building it reads the form but never changes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductPayload {
    pub title: String,
    pub description: String,
    /// JSON array of the literal size rows, values still strings
    pub sizes_json: String,
    /// Attached only when a new local file is staged
    pub image: Option<ImagePart>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePart {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Form state for creating or editing one product.
pub struct ProductForm {
    /// Absent for create, fixed for the form's lifetime on edit
    id: Option<String>,
    title: String,
    description: String,
    pub sizes: SizeList,
    pub image: ImageStaging,
}

impl ProductForm {
    /// Empty create form: one blank size row, nothing staged.
    pub fn new_create(cache_dir: PathBuf) -> Self {
        Self {
            id: None,
            title: String::new(),
            description: String::new(),
            sizes: SizeList::with_one_empty_row(),
            image: ImageStaging::new(cache_dir),
        }
    }

    /// Edit form pre-filled from a fetched product. The size list is taken
    /// as-is (it may be empty) and the preview shows the remote image.
    pub fn new_edit(cache_dir: PathBuf, product: &Product) -> Self {
        Self {
            id: Some(product.id.clone()),
            title: product.title.clone(),
            description: product.description.clone(),
            sizes: SizeList::from_rows(product.sizes.clone()),
            image: ImageStaging::with_remote_preview(cache_dir, &product.image_link),
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn is_edit(&self) -> bool {
        self.id.is_some()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_title(&mut self, title: String) {
        self.title = title;
    }

    pub fn set_description(&mut self, description: String) {
        self.description = description;
    }

    /// Advisory check run before submission; an empty list means the form
    /// may be submitted.
    pub fn validate_for_submit(&self) -> Vec<Violation> {
        let mut violations = Vec::new();

        if self.title.is_empty() {
            violations.push(Violation::EmptyTitle);
        }
        if self.description.is_empty() {
            violations.push(Violation::EmptyDescription);
        }
        if !self.is_edit() {
            if !self.image.has_local_file() {
                violations.push(Violation::MissingImage);
            }
            if self.sizes.is_empty() {
                violations.push(Violation::NoSizes);
            }
        }

        violations
    }

    /// Build the submission payload from the current state.
    ///
    /// Pure: no I/O, no mutation; two calls with no edit in between yield
    /// identical payloads.
    pub fn serialize(&self) -> Result<ProductPayload, serde_json::Error> {
        Ok(ProductPayload {
            title: self.title.clone(),
            description: self.description.clone(),
            sizes_json: self.sizes.to_json()?,
            image: self.image.file().map(|f| ImagePart {
                file_name: f.file_name.clone(),
                bytes: f.bytes.clone(),
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::image::PreviewRef;
    use crate::state::sizes::{SizeField, SizeRow};
    use std::fs;
    use std::path::Path;
    use std::sync::atomic::{AtomicU64, Ordering};

    const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
    static TEST_SEQ: AtomicU64 = AtomicU64::new(0);

    fn temp_dir(tag: &str) -> PathBuf {
        let seq = TEST_SEQ.fetch_add(1, Ordering::Relaxed);
        let dir = std::env::temp_dir().join(format!(
            "catalog-admin-form-{}-{}-{}",
            tag,
            std::process::id(),
            seq
        ));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn fake_image(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        let mut bytes = PNG_MAGIC.to_vec();
        bytes.extend_from_slice(b"pixels");
        fs::write(&path, bytes).unwrap();
        path
    }

    fn sample_product() -> Product {
        Product {
            id: "p1".to_string(),
            title: "X".to_string(),
            description: "Y".to_string(),
            image_link: "http://h/x.png".to_string(),
            sizes: vec![],
        }
    }

    #[test]
    fn test_create_form_starts_with_one_empty_row() {
        let form = ProductForm::new_create(temp_dir("create"));

        assert!(!form.is_edit());
        assert_eq!(form.title(), "");
        assert_eq!(form.description(), "");
        assert_eq!(form.sizes.len(), 1);
        assert_eq!(form.sizes.rows()[0], SizeRow::default());
        assert!(form.image.file().is_none());
    }

    #[test]
    fn test_create_scenario_valid_submission() {
        let src = temp_dir("scenario-a-src");
        let mut form = ProductForm::new_create(temp_dir("scenario-a"));

        form.set_title("Chair".to_string());
        form.set_description("Wood chair".to_string());
        form.sizes.update(0, SizeField::Width, "40").unwrap();
        form.sizes.update(0, SizeField::Height, "90").unwrap();
        form.sizes.update(0, SizeField::Price, "15000").unwrap();
        form.image.stage(&fake_image(&src, "chair.png")).unwrap();

        assert!(form.validate_for_submit().is_empty());

        let payload = form.serialize().unwrap();
        assert_eq!(payload.title, "Chair");
        assert_eq!(payload.description, "Wood chair");
        assert_eq!(
            payload.sizes_json,
            r#"[{"width":"40","height":"90","price":"15000"}]"#
        );
        let part = payload.image.unwrap();
        assert_eq!(part.file_name, "chair.png");
        assert!(part.bytes.starts_with(&PNG_MAGIC));
    }

    #[test]
    fn test_create_without_image_is_flagged() {
        let mut form = ProductForm::new_create(temp_dir("scenario-b"));
        form.set_title("Chair".to_string());
        form.set_description("Wood chair".to_string());

        let violations = form.validate_for_submit();

        assert!(violations.contains(&Violation::MissingImage));
        assert!(!violations.contains(&Violation::EmptyTitle));
    }

    #[test]
    fn test_create_with_emptied_sizes_is_flagged() {
        let mut form = ProductForm::new_create(temp_dir("no-sizes"));
        form.sizes.remove_at(0).unwrap();

        assert!(form.validate_for_submit().contains(&Violation::NoSizes));
    }

    #[test]
    fn test_edit_scenario_empty_sizes_and_remote_preview() {
        let form_dir = temp_dir("scenario-c");
        let mut form = ProductForm::new_edit(form_dir, &sample_product());

        assert!(form.is_edit());
        assert_eq!(form.id(), Some("p1"));
        assert_eq!(form.sizes.len(), 0);

        form.sizes.append();
        assert_eq!(form.sizes.len(), 1);
        assert_eq!(form.sizes.rows()[0], SizeRow::default());

        match form.image.preview() {
            Some(PreviewRef::Remote(url)) => assert_eq!(url, "http://h/x.png"),
            other => panic!("expected remote preview, got {:?}", other),
        }
        assert!(form.image.file().is_none());
    }

    #[test]
    fn test_edit_submits_without_new_image() {
        let mut form = ProductForm::new_edit(temp_dir("edit-valid"), &sample_product());
        form.sizes.append();

        // No staged file and an empty fetched size list are both fine on edit
        assert!(form.validate_for_submit().is_empty());

        let payload = form.serialize().unwrap();
        assert!(payload.image.is_none());
    }

    #[test]
    fn test_empty_title_and_description_are_flagged() {
        let form = ProductForm::new_edit(temp_dir("blank"), &Product {
            title: String::new(),
            description: String::new(),
            ..sample_product()
        });

        let violations = form.validate_for_submit();

        assert!(violations.contains(&Violation::EmptyTitle));
        assert!(violations.contains(&Violation::EmptyDescription));
    }

    #[test]
    fn test_serialize_is_idempotent() {
        let src = temp_dir("idem-src");
        let mut form = ProductForm::new_create(temp_dir("idem"));
        form.set_title("Chair".to_string());
        form.set_description("Wood chair".to_string());
        form.image.stage(&fake_image(&src, "chair.png")).unwrap();

        let first = form.serialize().unwrap();
        let second = form.serialize().unwrap();

        assert_eq!(first, second);
    }
}
