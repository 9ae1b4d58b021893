//! Randomized student data generator for the JSON data store.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate, Utc};
use clap::Parser;
use rand::Rng;
use serde_json::json;
use uuid::Uuid;

use student_api::auth::Department;
use student_api::store::student::{StudentRecord, DEFAULT_COLLEGE};

#[derive(Parser)]
#[command(name = "seed")]
#[command(about = "Generate randomized student records for the JSON data store")]
#[command(version)]
struct Args {
    #[arg(long, default_value_t = 320, help = "Number of students to generate")]
    count: usize,

    #[arg(long, default_value = "students.json", help = "Output data file")]
    output: PathBuf,
}

const CITIES: &[&str] = &[
    "Erode, Tamil Nadu",
    "Coimbatore, Tamil Nadu",
    "Salem, Tamil Nadu",
    "Tirupur, Tamil Nadu",
    "Namakkal, Tamil Nadu",
    "Karur, Tamil Nadu",
    "Dharmapuri, Tamil Nadu",
    "Krishnagiri, Tamil Nadu",
    "Tiruchengode, Tamil Nadu",
    "Gobichettipalayam, Tamil Nadu",
];

const STREETS: &[&str] = &[
    "Anna Nagar",
    "Gandhi Road",
    "Perundurai Road",
    "Sathy Road",
    "Bhavani Road",
    "Karur Road",
    "Salem Road",
    "Coimbatore Road",
    "Main Street",
    "Station Road",
    "Bazaar Street",
    "College Road",
    "Veerappan Chatram",
    "Rangampalayam",
    "Surampatti",
];

fn main() -> Result<()> {
    let args = Args::parse();
    let mut rng = rand::thread_rng();

    let start = NaiveDate::from_ymd_opt(2020, 6, 1).context("invalid start date")?;
    let end = NaiveDate::from_ymd_opt(2025, 8, 31).context("invalid end date")?;
    let span_days = (end - start).num_days();

    let now = Utc::now();
    let mut students = Vec::with_capacity(args.count);
    for i in 1..=args.count {
        let number = format!("{:03}", i);
        let course = Department::ALL[rng.gen_range(0..Department::ALL.len())];

        students.push(StudentRecord {
            id: Uuid::new_v4().to_string(),
            first_name: "Student".to_string(),
            last_name: number.clone(),
            email: format!("student{}@gce.edu.in", number),
            phone: generate_phone(&mut rng),
            // roughly 50/50 split, deterministic per position
            gender: if i % 2 == 1 { "Male" } else { "Female" }.to_string(),
            address: format!(
                "{}, {}, {}",
                rng.gen_range(1..=999),
                STREETS[rng.gen_range(0..STREETS.len())],
                CITIES[rng.gen_range(0..CITIES.len())],
            ),
            enrollment_date: start + Duration::days(rng.gen_range(0..=span_days)),
            course: course.label().to_string(),
            year: rng.gen_range(1..=4),
            cgpa: (rng.gen_range(6.0..=9.0_f64) * 100.0).round() / 100.0,
            college: DEFAULT_COLLEGE.to_string(),
            created_at: now,
            updated_at: now,
        });
    }

    let data = serde_json::to_vec_pretty(&json!({ "students": &students }))?;
    std::fs::write(&args.output, data)
        .with_context(|| format!("failed to write {}", args.output.display()))?;

    println!(
        "Generated {} student records into {}",
        students.len(),
        args.output.display()
    );
    if !students.is_empty() {
        let average: f64 =
            students.iter().map(|s| s.cgpa).sum::<f64>() / students.len() as f64;
        println!("  Average CGPA: {:.2}", average);
    }
    println!(
        "  Courses: {}",
        Department::ALL
            .iter()
            .map(|d| d.label())
            .collect::<Vec<_>>()
            .join(", ")
    );

    Ok(())
}

/// Indian mobile numbers: 10 digits starting with 6-9.
fn generate_phone(rng: &mut impl Rng) -> String {
    let mut phone = rng.gen_range(6..=9).to_string();
    for _ in 0..9 {
        phone.push(char::from(b'0' + rng.gen_range(0..10u8)));
    }
    phone
}
