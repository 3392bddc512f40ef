//! Map-view row types — the denormalized read model for spatial queries.
//!
//! These rows are pure projections maintained by the store inside the same
//! transaction as the score upsert. The engine never reads them; everything
//! here is reproducible by re-running the engine over all subjects.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  subject::Wilayah,
  vocab::{KategoriKelayakan, KategoriKemiskinan},
};

/// One pesantren point on the map, with its latest score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PesantrenMapRow {
  pub pesantren_id:       Uuid,
  pub nama:               String,
  pub wilayah:            Wilayah,
  pub latitude:           f64,
  pub longitude:          f64,
  pub skor_terakhir:      i64,
  pub kategori_kelayakan: KategoriKelayakan,
  pub updated_at:         DateTime<Utc>,
}

/// One santri point on the map. Administrative labels are copied from the
/// parent pesantren at projection time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SantriMapRow {
  pub santri_id:           Uuid,
  pub pesantren_id:        Uuid,
  pub nama:                String,
  pub wilayah:             Wilayah,
  pub latitude:            f64,
  pub longitude:           f64,
  pub skor_terakhir:       i64,
  pub kategori_kemiskinan: KategoriKemiskinan,
  pub updated_at:          DateTime<Utc>,
}

// ─── Choropleth aggregates ───────────────────────────────────────────────────

/// Per-province rollup of pesantren map rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PesantrenRegionAggregate {
  /// `None` groups the rows whose pesantren carries no province label.
  pub provinsi:       Option<String>,
  pub jumlah:         i64,
  pub rata_rata_skor: f64,
  pub layak:          i64,
  pub cukup_layak:    i64,
  pub tidak_layak:    i64,
}

/// Per-province rollup of santri map rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SantriRegionAggregate {
  pub provinsi:       Option<String>,
  pub jumlah:         i64,
  pub rata_rata_skor: f64,
  pub sangat_miskin:  i64,
  pub miskin:         i64,
  pub rentan_miskin:  i64,
  pub tidak_miskin:   i64,
}
