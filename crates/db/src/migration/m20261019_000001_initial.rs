//! Initial schema: admin accounts, yearly APBDes and population snapshots,
//! UMKM listings, hamlet profiles and letter requests.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(INITIAL_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_SQL).await?;
        Ok(())
    }
}

const INITIAL_SQL: &str = r"
-- Staff accounts
CREATE TABLE admins (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    email VARCHAR(255) NOT NULL,
    password_hash VARCHAR(255) NOT NULL,
    nama VARCHAR(120) NOT NULL,
    role VARCHAR(20) NOT NULL DEFAULT 'operator',
    is_active BOOLEAN NOT NULL DEFAULT TRUE,
    last_login_at TIMESTAMPTZ,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_admin_role CHECK (role IN ('admin', 'operator'))
);

CREATE UNIQUE INDEX idx_admins_email ON admins(lower(email));

-- Yearly budget documents
CREATE TABLE apbdes (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    tahun INTEGER NOT NULL UNIQUE,
    ringkasan JSONB NOT NULL,
    pendapatan JSONB NOT NULL,
    belanja JSONB NOT NULL,
    pembiayaan JSONB NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_apbdes_tahun CHECK (tahun BETWEEN 2000 AND 2100)
);

-- Yearly population snapshots
CREATE TABLE kependudukan (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    tahun INTEGER NOT NULL UNIQUE,
    data JSONB NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_kependudukan_tahun CHECK (tahun BETWEEN 2000 AND 2100)
);

-- Micro and small enterprises
CREATE TABLE umkm (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    nama VARCHAR(120) NOT NULL,
    deskripsi TEXT NOT NULL,
    harga VARCHAR(60) NOT NULL,
    whatsapp VARCHAR(20) NOT NULL,
    gambar JSONB NOT NULL DEFAULT '[]'::jsonb,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_umkm_gambar CHECK (jsonb_typeof(gambar) = 'array' AND jsonb_array_length(gambar) >= 1)
);

CREATE INDEX idx_umkm_created ON umkm(created_at DESC);

-- Hamlet profiles
CREATE TABLE dusun (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    nama VARCHAR(100) NOT NULL,
    kepala_dusun VARCHAR(120) NOT NULL,
    deskripsi TEXT NOT NULL DEFAULT '',
    jumlah_kk INTEGER NOT NULL DEFAULT 0 CHECK (jumlah_kk >= 0),
    jumlah_penduduk INTEGER NOT NULL DEFAULT 0 CHECK (jumlah_penduduk >= 0),
    gambar TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

-- Letter requests, one table for all kinds
CREATE TYPE letter_kind AS ENUM (
    'kelahiran', 'kematian', 'izin_keramaian', 'pengantar_skck', 'keterangan'
);
CREATE TYPE letter_status AS ENUM ('pending', 'finish');

CREATE TABLE letter_requests (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    kind letter_kind NOT NULL,
    status letter_status NOT NULL DEFAULT 'pending',
    nomor_surat VARCHAR(100),
    nama_pemohon VARCHAR(200) NOT NULL,
    data JSONB NOT NULL,
    submitted_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

-- Admin list: per kind, newest first, optionally by status
CREATE INDEX idx_letters_kind_submitted ON letter_requests(kind, submitted_at DESC);
CREATE INDEX idx_letters_kind_status ON letter_requests(kind, status, submitted_at DESC);
";

const DROP_SQL: &str = r"
DROP TABLE IF EXISTS letter_requests CASCADE;
DROP TYPE IF EXISTS letter_status;
DROP TYPE IF EXISTS letter_kind;
DROP TABLE IF EXISTS dusun CASCADE;
DROP TABLE IF EXISTS umkm CASCADE;
DROP TABLE IF EXISTS kependudukan CASCADE;
DROP TABLE IF EXISTS apbdes CASCADE;
DROP TABLE IF EXISTS admins CASCADE;
";
