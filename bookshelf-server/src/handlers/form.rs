//! Book form extraction

use crate::error::AppError;
use crate::state::AppState;
use axum::{
    async_trait,
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
    Form,
};
use axum_extra::extract::Multipart;
use bookshelf_core::storage::{upload_image, ImageUpload};
use bookshelf_core::Book;
use std::collections::HashMap;

/// Fields submitted by the add/edit form
#[derive(Debug, Default)]
pub struct BookForm {
    pub title: String,
    pub author: String,
    pub published_date: String,
    pub image_url: String,
    pub description: String,
    /// Cover file from the `image` field, if one was chosen
    pub image: Option<ImageUpload>,
}

impl BookForm {
    fn set(&mut self, name: &str, value: String) {
        match name {
            "title" => self.title = value,
            "author" => self.author = value,
            "publishedDate" => self.published_date = value,
            "imageURL" => self.image_url = value,
            "description" => self.description = value,
            _ => {}
        }
    }

    /// Upload the cover if one was submitted, then build the (unsaved) book
    pub async fn into_book(self, state: &AppState) -> Result<Book, AppError> {
        let image_url = match self.image {
            Some(upload) => upload_image(state.storage.as_deref(), upload)
                .await
                .map_err(|e| {
                    let message = format!("could not upload file: {e}");
                    state.app_error(e, message)
                })?,
            None => self.image_url,
        };

        Ok(Book {
            id: 0,
            title: self.title,
            author: self.author,
            published_date: self.published_date,
            image_url: (!image_url.is_empty()).then_some(image_url),
            description: (!self.description.is_empty()).then_some(self.description),
        })
    }
}

#[async_trait]
impl FromRequest<AppState> for BookForm {
    type Rejection = AppError;

    async fn from_request(req: Request, state: &AppState) -> Result<Self, Self::Rejection> {
        let parse_error = |e: anyhow::Error| {
            let message = format!("could not parse book from form: {e}");
            state.app_error(e, message)
        };

        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let mut form = BookForm::default();
        match content_type {
            None => {}
            Some(ct) if ct.starts_with("multipart/form-data") => {
                let mut multipart = Multipart::from_request(req, state)
                    .await
                    .map_err(|e| parse_error(e.into()))?;

                while let Some(field) = multipart
                    .next_field()
                    .await
                    .map_err(|e| parse_error(e.into()))?
                {
                    let name = field.name().unwrap_or_default().to_string();
                    if name == "image" {
                        let file_name = field.file_name().unwrap_or_default().to_string();
                        let content_type = field.content_type().map(str::to_string);
                        let data = field.bytes().await.map_err(|e| parse_error(e.into()))?;

                        // Browsers send an empty part when no file was chosen
                        if !file_name.is_empty() && !data.is_empty() {
                            form.image = Some(ImageUpload {
                                file_name,
                                content_type,
                                data: data.to_vec(),
                            });
                        }
                    } else {
                        let value = field.text().await.map_err(|e| parse_error(e.into()))?;
                        form.set(&name, value);
                    }
                }
            }
            Some(_) => {
                let Form(fields) = Form::<HashMap<String, String>>::from_request(req, state)
                    .await
                    .map_err(|e| parse_error(e.into()))?;
                for (name, value) in fields {
                    form.set(&name, value);
                }
            }
        }

        Ok(form)
    }
}
