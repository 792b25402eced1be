use actix_multipart::{Field, Multipart};
use bytes::BytesMut;
use futures_util::TryStreamExt;

use crate::{
    entities::media::{FormFields, ImageInput, MediaForm, UploadedImage},
    errors::AppError,
};

const IMAGE_FIELD: &str = "image";
const MAX_TEXT_FIELD_BYTES: usize = 64 * 1024;

/// Reads a media-bearing form. A part named `image` that carries a filename is
/// the uploaded file; a plain `image` text part is an image URL. Everything
/// else lands in [`FormFields`]. At most one image file is accepted and file
/// parts under any other name are rejected.
pub async fn read_media_form(mut payload: Multipart, max_file_bytes: usize) -> Result<MediaForm, AppError> {
    let mut fields = FormFields::new();
    let mut image = ImageInput::none();

    while let Some(mut field) = payload.try_next().await? {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .map(str::to_string);

        match (name.as_str(), file_name) {
            (IMAGE_FIELD, Some(file_name)) => {
                let bytes = read_field(&mut field, max_file_bytes, IMAGE_FIELD).await?;
                // Browsers send an empty part for an untouched file input.
                if bytes.is_empty() && file_name.is_empty() {
                    continue;
                }
                if image.file.is_some() {
                    return Err(AppError::invalid_field(IMAGE_FIELD, "only one image file is allowed"));
                }
                let content_type = field.content_type().map(|mime| mime.to_string());
                image.file = Some(UploadedImage {
                    bytes: bytes.freeze(),
                    content_type,
                    file_name: Some(file_name).filter(|n| !n.is_empty()),
                });
            }
            (_, Some(_)) => {
                return Err(AppError::invalid_field(&name, "unexpected file field"));
            }
            (_, None) => {
                let bytes = read_field(&mut field, MAX_TEXT_FIELD_BYTES, &name).await?;
                let value = String::from_utf8(bytes.to_vec())
                    .map_err(|_| AppError::invalid_field(&name, "must be valid UTF-8 text"))?;

                if name == IMAGE_FIELD {
                    image.url = Some(value);
                } else {
                    fields.insert(name, value);
                }
            }
        }
    }

    Ok(MediaForm { fields, image })
}

async fn read_field(field: &mut Field, limit: usize, name: &str) -> Result<BytesMut, AppError> {
    let mut buf = BytesMut::new();
    while let Some(chunk) = field.try_next().await? {
        if buf.len() + chunk.len() > limit {
            return Err(AppError::invalid_field(
                name,
                format!("exceeds the {} byte limit", limit),
            ));
        }
        buf.extend_from_slice(&chunk);
    }
    Ok(buf)
}
