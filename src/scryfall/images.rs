//! Image URL selection for single- and multi-faced cards

use super::model::Card;
use crate::config::ImageSize;
use crate::error::{Error, Result};
use crate::naming::sanitize_filename;

/// One image to download for a card
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageRef {
    /// Image URL
    pub url: String,
    /// Filename suffix identifying the face (`-Front`), empty for single-faced cards
    pub face_suffix: String,
}

/// Select the image URL(s) of the requested size for a card
///
/// Single-faced cards yield one image. Multi-faced cards yield one image per face in
/// face order, each with a suffix built from the face name. If any face lacks the
/// requested size the whole card fails, naming that face.
pub fn select_images(card: &Card, size: ImageSize) -> Result<Vec<ImageRef>> {
    let key = size.as_str();

    if let Some(uris) = card.image_uris.as_ref().filter(|uris| !uris.is_empty()) {
        let url = uris.get(key).ok_or_else(|| Error::ImageUnavailable {
            card: card.name.clone(),
            face: None,
            size: key.to_string(),
        })?;
        return Ok(vec![ImageRef {
            url: url.clone(),
            face_suffix: String::new(),
        }]);
    }

    let faces = card
        .card_faces
        .as_ref()
        .filter(|faces| !faces.is_empty())
        .ok_or_else(|| Error::MissingImages {
            card: card.name.clone(),
        })?;

    faces
        .iter()
        .enumerate()
        .map(|(index, face)| {
            let label = face
                .name
                .clone()
                .unwrap_or_else(|| format!("face{}", index + 1));
            let url = face
                .image_uris
                .as_ref()
                .and_then(|uris| uris.get(key))
                .ok_or_else(|| Error::ImageUnavailable {
                    card: card.name.clone(),
                    face: Some(format!("face {} ({label})", index + 1)),
                    size: key.to_string(),
                })?;
            Ok(ImageRef {
                url: url.clone(),
                face_suffix: format!("-{}", sanitize_filename(&label)),
            })
        })
        .collect()
}
