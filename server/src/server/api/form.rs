//! Multipart form collection and typed field parsing.

use std::collections::HashMap;
use std::str::FromStr;

use axum::extract::Multipart;

/// An uploaded file part.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: String,
    pub data: Vec<u8>,
}

/// All parts of a multipart request: the `file` part plus text fields.
#[derive(Debug, Default)]
pub struct FormData {
    file: Option<UploadedFile>,
    fields: HashMap<String, String>,
}

impl FormData {
    /// Drain a multipart stream. The part named `file` is kept as bytes and
    /// the parts listed in `text_fields` are read as text. Any other part is
    /// skipped without being decoded.
    pub async fn collect(multipart: &mut Multipart, text_fields: &[&str]) -> Result<Self, String> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await.map_err(|e| e.to_string())? {
            let name = field.name().unwrap_or("").to_string();
            if name == "file" {
                let filename = field.file_name().unwrap_or("").to_string();
                let data = field.bytes().await.map_err(|e| e.to_string())?;
                form.file = Some(UploadedFile {
                    filename,
                    data: data.to_vec(),
                });
            } else if text_fields.contains(&name.as_str()) {
                let text = field.text().await.map_err(|e| e.to_string())?;
                form.fields.insert(name, text);
            } else {
                tracing::debug!(name = %name, "Ignoring unknown form field");
            }
        }

        Ok(form)
    }

    #[cfg(test)]
    pub(crate) fn from_parts(file: Option<UploadedFile>, fields: &[(&str, &str)]) -> Self {
        Self {
            file,
            fields: fields
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    /// Take the uploaded file, failing if the request had none.
    pub fn take_file(&mut self) -> Result<UploadedFile, String> {
        self.file
            .take()
            .ok_or_else(|| "field 'file' is required".to_string())
    }

    /// Parse a required field.
    pub fn required<T: FromStr>(&self, name: &str, kind: &str) -> Result<T, String> {
        let raw = self
            .fields
            .get(name)
            .ok_or_else(|| format!("field '{name}' is required"))?;
        parse_value(name, raw, kind)
    }

    /// Parse an optional field, falling back to `default` when absent.
    pub fn optional<T: FromStr>(&self, name: &str, kind: &str, default: T) -> Result<T, String> {
        match self.fields.get(name) {
            Some(raw) => parse_value(name, raw, kind),
            None => Ok(default),
        }
    }
}

fn parse_value<T: FromStr>(name: &str, raw: &str, kind: &str) -> Result<T, String> {
    raw.trim()
        .parse::<T>()
        .map_err(|_| format!("field '{name}' must be {kind}, got '{raw}'"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_parses_integer() {
        let form = FormData::from_parts(None, &[("x", " 42 ")]);
        assert_eq!(form.required::<i64>("x", "an integer"), Ok(42));
    }

    #[test]
    fn required_reports_missing_field() {
        let form = FormData::from_parts(None, &[]);
        assert_eq!(
            form.required::<i64>("width", "an integer"),
            Err("field 'width' is required".to_string())
        );
    }

    #[test]
    fn required_reports_type_mismatch() {
        let form = FormData::from_parts(None, &[("y", "ten")]);
        assert_eq!(
            form.required::<i64>("y", "an integer"),
            Err("field 'y' must be an integer, got 'ten'".to_string())
        );
    }

    #[test]
    fn optional_uses_default_when_absent() {
        let form = FormData::from_parts(None, &[]);
        assert_eq!(form.optional("zoom", "a number", 1.0_f64), Ok(1.0));
    }

    #[test]
    fn optional_parses_when_present() {
        let form = FormData::from_parts(None, &[("zoom", "2.5")]);
        assert_eq!(form.optional("zoom", "a number", 1.0_f64), Ok(2.5));
    }

    #[test]
    fn take_file_requires_file_part() {
        let mut form = FormData::from_parts(None, &[]);
        assert!(form.take_file().is_err());

        let mut form = FormData::from_parts(
            Some(UploadedFile {
                filename: "a.png".into(),
                data: vec![1, 2, 3],
            }),
            &[],
        );
        assert_eq!(form.take_file().unwrap().filename, "a.png");
    }
}
