//! Typed mapping from source records to database inputs.
//!
//! Records are validated here, at the boundary: a POI without a name or
//! with an unusable location is rejected before any image is fetched.

use serde::Deserialize;
use serde_json::Value;
use travelguide_core::categories::{category_for_code, CITY_CATEGORY};
use travelguide_core::geo::{parse_lon_lat, Coordinates};
use travelguide_core::types::DbId;
use travelguide_core::validation::validate_place_rating;
use travelguide_db::models::attraction::CreateAttraction;
use travelguide_db::models::destination::CreateDestination;
use travelguide_db::models::image::CreateAttractionImage;
use travelguide_sources::lenient;
use travelguide_sources::narrative::NarrativeData;

use crate::error::PipelineError;
use crate::media::ImageIngest;

/// Default rating of a collected destination.
const DESTINATION_RATING: f64 = 5.0;

const DEFAULT_COUNTRY: &str = "中国";

// ---------------------------------------------------------------------------
// POI records
// ---------------------------------------------------------------------------

/// One POI object as returned by the map provider.
#[derive(Debug, Clone, Deserialize)]
pub struct PoiRecord {
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub business: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub address: String,
    /// `"lon,lat"`.
    #[serde(default, deserialize_with = "lenient::string")]
    pub location: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub typecode: String,
    #[serde(default)]
    pub photos: Vec<PoiPhoto>,
    #[serde(default)]
    pub biz_ext: Value,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PoiPhoto {
    #[serde(default, deserialize_with = "lenient::string")]
    pub url: String,
}

impl PoiRecord {
    pub fn from_value(value: &Value) -> Result<Self, PipelineError> {
        Self::deserialize(value).map_err(|e| PipelineError::InvalidRecord(e.to_string()))
    }

    /// `biz_ext.rating`, or 0 when absent, non-numeric or out of range.
    pub fn rating(&self) -> f64 {
        let rating = match self.biz_ext.get("rating") {
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        rating
            .filter(|r| validate_place_rating(*r).is_ok())
            .unwrap_or(0.0)
    }
}

/// An attraction ready to upsert, with its images already ingested.
#[derive(Debug, Clone, PartialEq)]
pub struct MappedAttraction {
    pub name: String,
    pub description: String,
    pub location: String,
    pub coordinates: Coordinates,
    pub category: &'static str,
    pub rating: f64,
    pub destination_id: DbId,
    pub cover_image_id: Option<DbId>,
    pub gallery: Vec<GalleryImage>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GalleryImage {
    pub image_id: DbId,
    pub title: String,
    pub order: i32,
}

impl MappedAttraction {
    pub fn to_create(&self) -> CreateAttraction {
        CreateAttraction {
            name: self.name.clone(),
            description: Some(self.description.clone()),
            destination_id: self.destination_id,
            cover_image_id: self.cover_image_id,
            location: self.location.clone(),
            latitude: Some(self.coordinates.latitude),
            longitude: Some(self.coordinates.longitude),
            category: Some(self.category.to_string()),
            rating: Some(self.rating),
            ..Default::default()
        }
    }

    pub fn gallery_rows(&self) -> Vec<CreateAttractionImage> {
        self.gallery
            .iter()
            .map(|g| CreateAttractionImage {
                image_id: g.image_id,
                title: g.title.clone(),
                description: String::new(),
                sort_order: g.order,
            })
            .collect()
    }
}

/// Map a raw POI to an attraction, ingesting its photos.
///
/// The first photo becomes the cover; photo `i >= 1` becomes gallery entry
/// `i` titled `"{name}_{i+1}"`. A photo that fails to ingest is omitted.
pub async fn map_poi_to_attraction(
    poi: &Value,
    destination_id: DbId,
    ingest: &dyn ImageIngest,
) -> Result<MappedAttraction, PipelineError> {
    let record = PoiRecord::from_value(poi)?;

    let name = record.name.trim().to_string();
    if name.is_empty() {
        return Err(PipelineError::InvalidRecord("POI has no name".into()));
    }
    let coordinates = parse_lon_lat(&record.location)?;

    let address = record.address.trim();
    let location = if address.is_empty() { name.clone() } else { address.to_string() };

    let mut cover_image_id = None;
    let mut gallery = Vec::new();
    for (i, photo) in record.photos.iter().enumerate() {
        if photo.url.trim().is_empty() {
            continue;
        }
        let title = format!("{name}_{}", i + 1);
        let Some(image_id) = ingest.ingest(&photo.url, &title).await else {
            continue;
        };
        if i == 0 {
            cover_image_id = Some(image_id);
        } else {
            gallery.push(GalleryImage {
                image_id,
                title,
                order: i as i32,
            });
        }
    }

    Ok(MappedAttraction {
        description: record.business.clone(),
        location,
        coordinates,
        category: category_for_code(&record.typecode),
        rating: record.rating(),
        destination_id,
        cover_image_id,
        gallery,
        name,
    })
}

// ---------------------------------------------------------------------------
// Destinations
// ---------------------------------------------------------------------------

/// A destination merged from the travel-site scrape and the narrative.
#[derive(Debug, Clone, PartialEq)]
pub struct MappedDestination {
    pub title: String,
    pub description: String,
    pub long_description: String,
    pub location: String,
    pub province: String,
    pub country: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub best_season: String,
    pub cover_image_id: Option<DbId>,
}

impl MappedDestination {
    pub fn to_create(&self) -> CreateDestination {
        CreateDestination {
            title: self.title.clone(),
            description: Some(self.description.clone()),
            long_description: Some(self.long_description.clone()),
            cover_image_id: self.cover_image_id,
            location: self.location.clone(),
            province: Some(self.province.clone()),
            country: Some(self.country.clone()),
            latitude: self.latitude,
            longitude: self.longitude,
            category: Some(CITY_CATEGORY.to_string()),
            best_season: Some(self.best_season.clone()),
            rating: Some(DESTINATION_RATING),
        }
    }
}

pub fn map_destination(
    city: &str,
    narrative: NarrativeData,
    cover_image_id: Option<DbId>,
) -> MappedDestination {
    let country = if narrative.country.trim().is_empty() {
        DEFAULT_COUNTRY.to_string()
    } else {
        narrative.country
    };
    MappedDestination {
        title: city.to_string(),
        description: narrative.description,
        long_description: narrative.long_description,
        location: city.to_string(),
        province: narrative.province,
        country,
        latitude: narrative.latitude,
        longitude: narrative.longitude,
        best_season: narrative.best_season,
        cover_image_id,
    }
}
