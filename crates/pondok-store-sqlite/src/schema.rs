//! SQL schema for the Pondok SQLite store.
//!
//! Executed once at connection startup via `PRAGMA user_version`. Future
//! migrations will be gated on that version number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS pesantren (
    pesantren_id    TEXT PRIMARY KEY,
    nama            TEXT NOT NULL,
    nomor_statistik TEXT,
    provinsi        TEXT,
    kabupaten       TEXT,
    kecamatan       TEXT,
    desa            TEXT,
    latitude        REAL,
    longitude       REAL,
    created_at      TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS santri (
    santri_id     TEXT PRIMARY KEY,
    pesantren_id  TEXT NOT NULL REFERENCES pesantren(pesantren_id) ON DELETE CASCADE,
    nama          TEXT NOT NULL,
    jenis_kelamin TEXT,           -- 'L' | 'P'
    status_mukim  TEXT,           -- 'mondok' | 'pp' | 'mukim'
    latitude      REAL,
    longitude     REAL,
    created_at    TEXT NOT NULL
);

-- Attribute records: at most one row per subject, keyed by the subject id.
-- Vocabulary columns hold canonical lowercase tokens; legacy imports may
-- still contain free text, which the read path folds to the worst bracket.

CREATE TABLE IF NOT EXISTS pesantren_fisik (
    pesantren_id     TEXT PRIMARY KEY REFERENCES pesantren(pesantren_id) ON DELETE CASCADE,
    kondisi_bangunan TEXT,
    sanitasi         TEXT,
    sumber_air       TEXT,
    kualitas_air     TEXT,
    keamanan         TEXT,
    lantai           TEXT,
    atap             TEXT,
    dinding          TEXT,
    santri_per_kamar INTEGER
);

CREATE TABLE IF NOT EXISTS pesantren_fasilitas (
    pesantren_id TEXT PRIMARY KEY REFERENCES pesantren(pesantren_id) ON DELETE CASCADE,
    asrama       TEXT,
    ruang_kelas  TEXT,
    internet     INTEGER,         -- 0 | 1
    transportasi INTEGER,
    akses_jalan  TEXT,
    dapur        INTEGER,
    mck          INTEGER
);

CREATE TABLE IF NOT EXISTS pesantren_pendidikan (
    pesantren_id              TEXT PRIMARY KEY REFERENCES pesantren(pesantren_id) ON DELETE CASCADE,
    akreditasi                TEXT,
    kurikulum                 TEXT,
    jenjang                   TEXT,
    santri_per_guru           INTEGER,
    persen_guru_bersertifikat INTEGER,
    prestasi                  TEXT
);

CREATE TABLE IF NOT EXISTS santri_ekonomi (
    santri_id           TEXT PRIMARY KEY REFERENCES santri(santri_id) ON DELETE CASCADE,
    penghasilan_bulanan INTEGER,
    jumlah_tanggungan   INTEGER
);

CREATE TABLE IF NOT EXISTS santri_rumah (
    santri_id          TEXT PRIMARY KEY REFERENCES santri(santri_id) ON DELETE CASCADE,
    status_kepemilikan TEXT,
    akses_air          TEXT,
    dinding            TEXT,
    atap               TEXT,
    lantai             TEXT
);

CREATE TABLE IF NOT EXISTS santri_aset (
    santri_id  TEXT PRIMARY KEY REFERENCES santri(santri_id) ON DELETE CASCADE,
    kendaraan  INTEGER,
    tanah      INTEGER,
    ternak     INTEGER,
    elektronik INTEGER
);

CREATE TABLE IF NOT EXISTS santri_pembiayaan (
    santri_id         TEXT PRIMARY KEY REFERENCES santri(santri_id) ON DELETE CASCADE,
    sumber_biaya      TEXT,
    status_pembayaran TEXT
);

CREATE TABLE IF NOT EXISTS santri_kesehatan (
    santri_id       TEXT PRIMARY KEY REFERENCES santri(santri_id) ON DELETE CASCADE,
    penyakit_kronis INTEGER,
    akses_layanan   TEXT
);

CREATE TABLE IF NOT EXISTS santri_bansos (
    santri_id      TEXT PRIMARY KEY REFERENCES santri(santri_id) ON DELETE CASCADE,
    jumlah_program INTEGER
);

-- Score rows: zero or one per subject, enforced by the unique constraint.
-- skor_id is allocated on first insert and never changes afterwards.

CREATE TABLE IF NOT EXISTS pesantren_skor (
    skor_id            TEXT PRIMARY KEY,
    pesantren_id       TEXT NOT NULL UNIQUE REFERENCES pesantren(pesantren_id) ON DELETE CASCADE,
    skor_fisik         INTEGER NOT NULL,
    skor_fasilitas     INTEGER NOT NULL,
    skor_pendidikan    INTEGER NOT NULL,
    skor_total         INTEGER NOT NULL,
    kategori_kelayakan TEXT NOT NULL,
    metode             TEXT NOT NULL,
    version            TEXT NOT NULL,
    calculated_at      TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS santri_skor (
    skor_id             TEXT PRIMARY KEY,
    santri_id           TEXT NOT NULL UNIQUE REFERENCES santri(santri_id) ON DELETE CASCADE,
    skor_ekonomi        INTEGER NOT NULL,
    skor_rumah          INTEGER NOT NULL,
    skor_aset           INTEGER NOT NULL,
    skor_pembiayaan     INTEGER NOT NULL,
    skor_kesehatan      INTEGER NOT NULL,
    skor_bansos         INTEGER NOT NULL,
    skor_total          INTEGER NOT NULL,
    kategori_kemiskinan TEXT NOT NULL,
    metode              TEXT NOT NULL,
    version             TEXT NOT NULL,
    calculated_at       TEXT NOT NULL
);

-- Denormalized map views: maintained in the same transaction as the score
-- upsert, only for subjects with coordinates. Never read by the engine.

CREATE TABLE IF NOT EXISTS pesantren_map (
    pesantren_id       TEXT PRIMARY KEY REFERENCES pesantren(pesantren_id) ON DELETE CASCADE,
    nama               TEXT NOT NULL,
    provinsi           TEXT,
    kabupaten          TEXT,
    kecamatan          TEXT,
    desa               TEXT,
    latitude           REAL NOT NULL,
    longitude          REAL NOT NULL,
    skor_terakhir      INTEGER NOT NULL,
    kategori_kelayakan TEXT NOT NULL,
    updated_at         TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS santri_map (
    santri_id           TEXT PRIMARY KEY REFERENCES santri(santri_id) ON DELETE CASCADE,
    pesantren_id        TEXT NOT NULL,
    nama                TEXT NOT NULL,
    provinsi            TEXT,
    kabupaten           TEXT,
    kecamatan           TEXT,
    desa                TEXT,
    latitude            REAL NOT NULL,
    longitude           REAL NOT NULL,
    skor_terakhir       INTEGER NOT NULL,
    kategori_kemiskinan TEXT NOT NULL,
    updated_at          TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS santri_pesantren_idx   ON santri(pesantren_id);
CREATE INDEX IF NOT EXISTS pesantren_map_prov_idx ON pesantren_map(provinsi);
CREATE INDEX IF NOT EXISTS santri_map_prov_idx    ON santri_map(provinsi);

PRAGMA user_version = 1;
";
