//! Database seeder for TrackFest development and testing.
//!
//! Seeds a demo budget and one expense in every status so the dashboard and
//! the treasurer queue have something to show. Safe to run repeatedly.
//!
//! Usage: cargo run --bin seeder

use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use trackfest_core::expense::ImagePayload;
use trackfest_core::store::BudgetStore;
use trackfest_db::BudgetRepository;
use trackfest_db::entities::{
    expenses,
    sea_orm_active_enums::{ExpenseStatus, SubmitterRole},
};
use uuid::Uuid;

/// Demo budget total.
const DEMO_BUDGET: Decimal = dec!(50000);

struct DemoExpense {
    id: u128,
    submitter: &'static str,
    title: &'static str,
    amount: Decimal,
    description: Option<&'static str>,
    status: ExpenseStatus,
    hours_ago: i64,
}

const DEMO_EXPENSES: [DemoExpense; 5] = [
    DemoExpense {
        id: 0x0001,
        submitter: "Aarav",
        title: "Stage lighting rental",
        amount: dec!(12500),
        description: Some("Two nights, includes operator"),
        status: ExpenseStatus::PaymentCleared,
        hours_ago: 96,
    },
    DemoExpense {
        id: 0x0002,
        submitter: "Diya",
        title: "Printed banners",
        amount: dec!(3200),
        description: None,
        status: ExpenseStatus::Approved,
        hours_ago: 72,
    },
    DemoExpense {
        id: 0x0003,
        submitter: "Aarav",
        title: "Taxi to vendor",
        amount: dec!(450),
        description: Some("Late-night pickup"),
        status: ExpenseStatus::Rejected,
        hours_ago: 48,
    },
    DemoExpense {
        id: 0x0004,
        submitter: "Kabir",
        title: "Volunteer snacks",
        amount: dec!(1875.50),
        description: None,
        status: ExpenseStatus::Pending,
        hours_ago: 20,
    },
    DemoExpense {
        id: 0x0005,
        submitter: "Diya",
        title: "Sound check extension cords",
        amount: dec!(640),
        description: Some("Hardware store, 3 units"),
        status: ExpenseStatus::Pending,
        hours_ago: 2,
    },
];

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    println!("Connecting to database...");
    let db = trackfest_db::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    println!("Seeding budget...");
    seed_budget(&db).await;

    println!("Seeding expenses...");
    seed_expenses(&db).await;

    println!("Seeding complete!");
}

/// Seeds the demo budget unless one is already set.
async fn seed_budget(db: &DatabaseConnection) {
    let repo = BudgetRepository::new(db.clone());

    match repo.load_total().await {
        Ok(Some(total)) => println!("  Budget already set to {total}, skipping..."),
        Ok(None) => match repo.save_total(DEMO_BUDGET).await {
            Ok(()) => println!("  Set budget to {DEMO_BUDGET}"),
            Err(e) => eprintln!("Failed to set budget: {e}"),
        },
        Err(e) => eprintln!("Failed to read budget: {e}"),
    }
}

/// Seeds demo expenses with fixed ids.
async fn seed_expenses(db: &DatabaseConnection) {
    let placeholder = ImagePayload::from_bytes("image/png", b"\x89PNG\r\n\x1a\n")
        .expect("placeholder image is valid");

    for demo in &DEMO_EXPENSES {
        let id = Uuid::from_u128(demo.id);

        if expenses::Entity::find_by_id(id)
            .one(db)
            .await
            .ok()
            .flatten()
            .is_some()
        {
            println!("  Expense '{}' already exists, skipping...", demo.title);
            continue;
        }

        let proof = (demo.status == ExpenseStatus::PaymentCleared)
            .then(|| String::from(placeholder.clone()));

        let expense = expenses::ActiveModel {
            id: Set(id),
            submitter_name: Set(Some(demo.submitter.to_string())),
            title: Set(demo.title.to_string()),
            amount: Set(demo.amount),
            description: Set(demo.description.map(String::from)),
            submitter_role: Set(SubmitterRole::Student),
            status: Set(demo.status),
            receipt_image: Set(Some(placeholder.clone().into())),
            payment_proof_image: Set(proof),
            created_at: Set((Utc::now() - Duration::hours(demo.hours_ago)).into()),
        };

        if let Err(e) = expense.insert(db).await {
            eprintln!("Failed to insert expense '{}': {e}", demo.title);
        } else {
            println!("  Created expense: {} ({})", demo.title, demo.amount);
        }
    }
}
