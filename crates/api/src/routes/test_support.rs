//! Router test helpers: a mocked database, tokens and request shortcuts.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
    response::Response,
};
use chrono::{FixedOffset, TimeZone};
use desa_core::captcha::{AllowAll, CaptchaVerifier};
use desa_db::entities::{apbdes, dusun, letter_requests, sea_orm_active_enums, umkm};
use desa_shared::{JwtConfig, JwtService, LetterheadConfig};
use http_body_util::BodyExt;
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::{DatabaseConnection, MockExecResult, Transaction, Value};
use serde_json::json;
use tower::ServiceExt;
use uuid::Uuid;

use crate::{AppState, create_router};

pub struct TestApp {
    router: Router,
    db: DatabaseConnection,
    state: AppState,
}

impl TestApp {
    pub fn new(db: DatabaseConnection) -> Self {
        Self::with_captcha(db, Arc::new(AllowAll))
    }

    pub fn with_captcha(db: DatabaseConnection, captcha: Arc<dyn CaptchaVerifier>) -> Self {
        let state = AppState {
            db: Arc::new(db.clone()),
            jwt_service: Arc::new(JwtService::new(JwtConfig {
                secret: "test-secret".to_string(),
                access_token_expires_minutes: 30,
            })),
            captcha,
            letterhead: Arc::new(letterhead()),
        };
        Self {
            router: create_router(state.clone()),
            db,
            state,
        }
    }

    pub fn token(&self, role: &str) -> String {
        self.state
            .jwt_service
            .generate_access_token(Uuid::new_v4(), role)
            .unwrap()
    }

    pub fn expired_token(&self) -> String {
        JwtService::new(JwtConfig {
            secret: "test-secret".to_string(),
            access_token_expires_minutes: -10,
        })
        .generate_access_token(Uuid::new_v4(), "admin")
        .unwrap()
    }

    pub async fn send(&self, request: Request<Body>) -> Response {
        self.router.clone().oneshot(request).await.unwrap()
    }

    async fn json(&self, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = self.send(request).await;
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
        };
        (status, body)
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, serde_json::Value) {
        self.json(request("GET", uri, token, Body::empty())).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> (StatusCode, serde_json::Value) {
        self.json(request("DELETE", uri, token, Body::empty())).await
    }

    pub async fn post(
        &self,
        uri: &str,
        token: Option<&str>,
        body: serde_json::Value,
    ) -> (StatusCode, serde_json::Value) {
        self.json(request("POST", uri, token, Body::from(body.to_string())))
            .await
    }

    pub async fn put(
        &self,
        uri: &str,
        token: Option<&str>,
        body: serde_json::Value,
    ) -> (StatusCode, serde_json::Value) {
        self.json(request("PUT", uri, token, Body::from(body.to_string())))
            .await
    }

    pub fn into_transaction_log(self) -> Vec<Transaction> {
        drop(self.router);
        drop(self.state);
        self.db.into_transaction_log()
    }
}

pub fn request(method: &str, uri: &str, token: Option<&str>, body: Body) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(body).unwrap()
}

pub fn letterhead() -> LetterheadConfig {
    LetterheadConfig {
        nama_desa: "Sukamaju".into(),
        kecamatan: "Cibeber".into(),
        kabupaten: "Cianjur".into(),
        provinsi: "Jawa Barat".into(),
        alamat: "Jl. Raya Sukamaju No. 1".into(),
        kepala_desa: "H. Ahmad Sujana".into(),
        jabatan: "Kepala Desa".into(),
    }
}

pub fn stamp() -> DateTimeWithTimeZone {
    FixedOffset::east_opt(7 * 3600)
        .unwrap()
        .with_ymd_and_hms(2026, 10, 19, 9, 0, 0)
        .unwrap()
}

pub fn count_exec(rows_affected: u64) -> MockExecResult {
    MockExecResult {
        last_insert_id: 0,
        rows_affected,
    }
}

pub fn count_row(n: i64) -> BTreeMap<&'static str, Value> {
    BTreeMap::from([("num_items", Value::BigInt(Some(n)))])
}

pub fn apbdes_model(tahun: i32) -> apbdes::Model {
    apbdes::Model {
        id: Uuid::now_v7(),
        tahun,
        ringkasan: json!({
            "pendapatan": 175_000,
            "belanja": 90_000,
            "pembiayaan_penerimaan": 0,
            "pembiayaan_pengeluaran": 0,
            "surplus": 85_000
        }),
        pendapatan: json!({
            "total": 175_000,
            "rincian": [{"uraian": "Dana Desa", "jumlah": 175_000, "sub_rincian": [
                {"uraian": "Tahap I", "jumlah": 100_000},
                {"uraian": "Tahap II", "jumlah": 75_000}
            ]}]
        }),
        belanja: json!({"total": 90_000, "rincian": [{"uraian": "Pembangunan", "jumlah": 90_000}]}),
        pembiayaan: json!({}),
        created_at: stamp(),
        updated_at: stamp(),
    }
}

pub fn umkm_model() -> umkm::Model {
    umkm::Model {
        id: Uuid::now_v7(),
        nama: "Keripik Singkong Bu Sri".into(),
        deskripsi: "Keripik singkong pedas manis".into(),
        harga: "Rp 15.000 / bungkus".into(),
        whatsapp: "081234567890".into(),
        gambar: json!(["https://cdn.desa.id/umkm/keripik.jpg"]),
        created_at: stamp(),
        updated_at: stamp(),
    }
}

pub fn dusun_model(nama: &str) -> dusun::Model {
    dusun::Model {
        id: Uuid::now_v7(),
        nama: nama.to_string(),
        kepala_dusun: "Pak Darto".into(),
        deskripsi: String::new(),
        jumlah_kk: 210,
        jumlah_penduduk: 734,
        gambar: None,
        created_at: stamp(),
        updated_at: stamp(),
    }
}

pub fn statement_json() -> serde_json::Value {
    json!({
        "nama": "Rina Wulandari",
        "nik": "3201015505950003",
        "jenis_kelamin": "perempuan",
        "tempat_lahir": "Bandung",
        "tanggal_lahir": "1995-05-15",
        "pekerjaan": "Wiraswasta",
        "alamat": "Dusun Sukamulya RT 03/RW 01",
        "keperluan": "Persyaratan kredit usaha",
        "no_hp": "081298765432"
    })
}

pub fn letter_model(id: Uuid, nomor_surat: Option<&str>) -> letter_requests::Model {
    letter_requests::Model {
        id,
        kind: sea_orm_active_enums::LetterKind::Keterangan,
        status: if nomor_surat.is_some() {
            sea_orm_active_enums::LetterStatus::Finish
        } else {
            sea_orm_active_enums::LetterStatus::Pending
        },
        nomor_surat: nomor_surat.map(str::to_string),
        nama_pemohon: "Rina Wulandari".into(),
        data: statement_json(),
        submitted_at: stamp(),
        updated_at: stamp(),
    }
}
