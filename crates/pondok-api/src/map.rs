//! Handlers for `/map` read endpoints.
//!
//! These serve the denormalized map-view tables as-is: GeoJSON
//! `FeatureCollection`s for point rendering and per-province aggregates for
//! choropleth shading. Plain read-only queries; nothing here feeds back into
//! the engine.

use std::sync::Arc;

use axum::{Json, extract::State};
use pondok_core::{
  map::{
    PesantrenMapRow, PesantrenRegionAggregate, SantriMapRow,
    SantriRegionAggregate,
  },
  store::RegistryStore,
};
use serde_json::{Value, json};

use crate::error::{ApiError, store_err};

fn feature_collection(features: Vec<Value>) -> Value {
  json!({ "type": "FeatureCollection", "features": features })
}

fn pesantren_feature(row: &PesantrenMapRow) -> Value {
  json!({
    "type": "Feature",
    "geometry": {
      "type": "Point",
      "coordinates": [row.longitude, row.latitude],
    },
    "properties": {
      "pesantren_id": row.pesantren_id,
      "nama": row.nama,
      "provinsi": row.wilayah.provinsi,
      "kabupaten": row.wilayah.kabupaten,
      "kecamatan": row.wilayah.kecamatan,
      "desa": row.wilayah.desa,
      "skor_terakhir": row.skor_terakhir,
      "kategori_kelayakan": row.kategori_kelayakan,
      "updated_at": row.updated_at,
    },
  })
}

fn santri_feature(row: &SantriMapRow) -> Value {
  json!({
    "type": "Feature",
    "geometry": {
      "type": "Point",
      "coordinates": [row.longitude, row.latitude],
    },
    "properties": {
      "santri_id": row.santri_id,
      "pesantren_id": row.pesantren_id,
      "nama": row.nama,
      "provinsi": row.wilayah.provinsi,
      "kabupaten": row.wilayah.kabupaten,
      "kecamatan": row.wilayah.kecamatan,
      "desa": row.wilayah.desa,
      "skor_terakhir": row.skor_terakhir,
      "kategori_kemiskinan": row.kategori_kemiskinan,
      "updated_at": row.updated_at,
    },
  })
}

/// `GET /map/pesantren` — every scored pesantren with coordinates.
pub async fn pesantren_geojson<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Value>, ApiError>
where
  S: RegistryStore,
{
  let rows = store.list_pesantren_map().await.map_err(store_err)?;
  let features = rows.iter().map(pesantren_feature).collect();
  Ok(Json(feature_collection(features)))
}

/// `GET /map/santri`
pub async fn santri_geojson<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Value>, ApiError>
where
  S: RegistryStore,
{
  let rows = store.list_santri_map().await.map_err(store_err)?;
  let features = rows.iter().map(santri_feature).collect();
  Ok(Json(feature_collection(features)))
}

/// `GET /map/pesantren/choropleth` — per-province counts and mean score.
pub async fn pesantren_choropleth<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<PesantrenRegionAggregate>>, ApiError>
where
  S: RegistryStore,
{
  let buckets = store.pesantren_choropleth().await.map_err(store_err)?;
  Ok(Json(buckets))
}

/// `GET /map/santri/choropleth`
pub async fn santri_choropleth<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<SantriRegionAggregate>>, ApiError>
where
  S: RegistryStore,
{
  let buckets = store.santri_choropleth().await.map_err(store_err)?;
  Ok(Json(buckets))
}
