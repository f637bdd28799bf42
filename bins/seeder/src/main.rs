//! Database seeder for local development.
//!
//! Seeds the first admin account and a sample APBDes year. Safe to run
//! repeatedly: existing data is left alone.
//!
//! Environment:
//!   DATABASE_URL          - connection string (required)
//!   SEED_ADMIN_EMAIL      - admin email (default `admin@desa.local`)
//!   SEED_ADMIN_PASSWORD   - admin password (required)
//!   SEED_ADMIN_NAMA       - display name (default `Administrator`)
//!
//! Usage: cargo run --bin seeder

use anyhow::Context;
use desa_core::apbdes::{
    BudgetPlan, FinancingFlow, FinancingLine, Pembiayaan, Rincian, Section, SubRincian,
    SurplusKind, format_rupiah,
};
use desa_core::auth::{AdminRole, hash_password};
use desa_db::{AdminRepository, BudgetRepository, RepositoryError};

/// Year of the sample budget.
const SAMPLE_TAHUN: i32 = 2026;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    println!("Connecting to database...");
    let db = desa_db::connect(&database_url, 2, 1)
        .await
        .context("Failed to connect to database")?;

    println!("Seeding admin account...");
    seed_admin(&AdminRepository::new(db.clone())).await?;

    println!("Seeding APBDes {SAMPLE_TAHUN}...");
    seed_budget(&BudgetRepository::new(db)).await?;

    println!("Done.");
    Ok(())
}

async fn seed_admin(repo: &AdminRepository) -> anyhow::Result<()> {
    if repo.count().await? > 0 {
        println!("  Admin accounts already exist, skipping");
        return Ok(());
    }

    let email =
        std::env::var("SEED_ADMIN_EMAIL").unwrap_or_else(|_| "admin@desa.local".to_string());
    let password =
        std::env::var("SEED_ADMIN_PASSWORD").context("SEED_ADMIN_PASSWORD must be set")?;
    let nama = std::env::var("SEED_ADMIN_NAMA").unwrap_or_else(|_| "Administrator".to_string());

    let hash = hash_password(&password)?;
    let admin = repo
        .create(&email, &hash, &nama, AdminRole::Admin.as_str())
        .await?;
    println!("  Created admin {}", admin.email);
    Ok(())
}

async fn seed_budget(repo: &BudgetRepository) -> anyhow::Result<()> {
    let mut plan = sample_plan();
    plan.recompute()?;

    match repo.create(&plan).await {
        Ok(record) => {
            println!(
                "  Stored APBDes {} ({} {})",
                record.plan.tahun,
                SurplusKind::of(record.plan.ringkasan.surplus).label(),
                format_rupiah(record.plan.ringkasan.surplus)
            );
            Ok(())
        }
        Err(RepositoryError::Duplicate(_)) => {
            println!("  APBDes {SAMPLE_TAHUN} already exists, skipping");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

fn sub(uraian: &str, jumlah: i64) -> SubRincian {
    SubRincian {
        uraian: uraian.to_string(),
        jumlah,
    }
}

fn category(uraian: &str, sub_rincian: Vec<SubRincian>) -> Rincian {
    Rincian {
        uraian: uraian.to_string(),
        jumlah: 0,
        sub_rincian,
    }
}

fn line(uraian: &str, jumlah: i64) -> FinancingLine {
    FinancingLine {
        uraian: uraian.to_string(),
        jumlah,
    }
}

fn sample_plan() -> BudgetPlan {
    BudgetPlan {
        tahun: SAMPLE_TAHUN,
        pendapatan: Section {
            total: 0,
            rincian: vec![
                category(
                    "Pendapatan Transfer",
                    vec![
                        sub("Dana Desa", 1_012_450_000),
                        sub("Alokasi Dana Desa", 435_800_000),
                        sub("Bagi Hasil Pajak dan Retribusi", 48_300_000),
                    ],
                ),
                category(
                    "Pendapatan Asli Desa",
                    vec![sub("Hasil Usaha BUMDes", 25_000_000), sub("Sewa Tanah Kas Desa", 12_000_000)],
                ),
            ],
        },
        belanja: Section {
            total: 0,
            rincian: vec![
                category(
                    "Penyelenggaraan Pemerintahan Desa",
                    vec![sub("Penghasilan Tetap dan Tunjangan", 420_000_000), sub("Operasional Kantor", 95_500_000)],
                ),
                category(
                    "Pelaksanaan Pembangunan Desa",
                    vec![
                        sub("Rehabilitasi Jalan Desa", 610_000_000),
                        sub("Pembangunan Drainase", 180_000_000),
                    ],
                ),
                category(
                    "Pembinaan Kemasyarakatan",
                    vec![sub("Kegiatan PKK", 35_000_000), sub("Karang Taruna", 20_000_000)],
                ),
                category(
                    "Pemberdayaan Masyarakat",
                    vec![sub("Pelatihan UMKM", 45_000_000)],
                ),
            ],
        },
        pembiayaan: Pembiayaan {
            penerimaan: FinancingFlow {
                total: 0,
                rincian: vec![line("SiLPA Tahun Sebelumnya", 64_200_000)],
            },
            pengeluaran: FinancingFlow {
                total: 0,
                rincian: vec![line("Penyertaan Modal BUMDes", 50_000_000)],
            },
            surplus: 0,
        },
        ..BudgetPlan::default()
    }
}
