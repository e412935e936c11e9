//! Demo data: the seed roster the dashboard ships with, a handful of open
//! demands, and the projects the Gantt view draws.

use chrono::{NaiveDate, TimeZone, Utc};
use entity::employee::Availability;
use entity::{demand, employee, project, StringList};
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr};

#[derive(Debug, Clone)]
pub struct SeededRecords {
    pub employees: Vec<employee::Model>,
    pub demands: Vec<demand::Model>,
    pub projects: Vec<project::Model>,
}

impl SeededRecords {
    pub fn employee_named(&self, name: &str) -> Option<&employee::Model> {
        self.employees.iter().find(|e| e.name == name)
    }

    pub fn demand_for_role(&self, role: &str) -> Option<&demand::Model> {
        self.demands
            .iter()
            .find(|d| d.role.as_deref() == Some(role))
    }
}

pub async fn seed_demo(db: &DatabaseConnection) -> Result<SeededRecords, DbErr> {
    let mut employees = Vec::new();
    for (name, skills, qualifications, strength, availability, team) in [
        (
            "Alice Johnson",
            &["React", "JavaScript", "CSS", "HTML"][..],
            &["B.Tech CS", "Full Stack Developer"][..],
            95,
            Availability::Available,
            "Frontend",
        ),
        (
            "Bob Smith",
            &["Python", "FastAPI", "PostgreSQL", "Docker"][..],
            &["M.Tech", "Backend Developer"][..],
            88,
            Availability::PartiallyAvailable,
            "Backend",
        ),
        (
            "Carol Davis",
            &["React", "Node.js", "MongoDB", "GraphQL"][..],
            &["B.Tech IT", "Full Stack Developer"][..],
            92,
            Availability::Available,
            "Full Stack",
        ),
        (
            "David Wilson",
            &["DevOps", "Kubernetes", "AWS", "Terraform"][..],
            &["Cloud Architect Certification", "DevOps Engineer"][..],
            85,
            Availability::NotAvailable,
            "Infrastructure",
        ),
        (
            "Emma Taylor",
            &["Machine Learning", "Python", "TensorFlow", "Data Analysis"][..],
            &["M.S. Data Science", "ML Engineer"][..],
            90,
            Availability::Available,
            "AI/ML",
        ),
    ] {
        let inserted = employee::ActiveModel {
            id: NotSet,
            name: Set(name.to_string()),
            team: Set(team.to_string()),
            availability: Set(availability),
            strength: Set(strength),
            skills: Set(StringList::from(skills)),
            qualifications: Set(StringList::from(qualifications)),
        }
        .insert(db)
        .await?;
        employees.push(inserted);
    }

    let mut demands = Vec::new();
    for (role, role_code, location, status, probability, allocation, rate, start, end) in [
        (
            "Sr. Frontend Developer",
            "FE-SR",
            "Pune",
            "Open",
            80,
            100,
            95.0,
            date(2026, 9, 1),
            date(2027, 3, 31),
        ),
        (
            "Backend Engineer",
            "BE-02",
            "Bengaluru",
            "Open",
            70,
            100,
            90.0,
            date(2026, 8, 15),
            date(2027, 2, 28),
        ),
        (
            "DevOps Specialist",
            "DO-01",
            "Remote",
            "Proposed",
            50,
            50,
            110.0,
            date(2026, 10, 1),
            date(2027, 1, 31),
        ),
        (
            "React Developer",
            "FE-JR",
            "Pune",
            "Open",
            90,
            100,
            70.0,
            date(2026, 8, 20),
            date(2026, 12, 31),
        ),
        (
            "Backend Engineer",
            "BE-03",
            "Hyderabad",
            "Fulfilled",
            100,
            100,
            90.0,
            date(2026, 7, 1),
            date(2026, 12, 31),
        ),
        (
            "ML Engineer",
            "ML-01",
            "Remote",
            "Proposed",
            40,
            50,
            130.0,
            date(2026, 11, 1),
            date(2027, 6, 30),
        ),
    ] {
        let inserted = demand::ActiveModel {
            id: NotSet,
            sno: Set(Some(demands.len() as i32 + 1)),
            project_id: Set(Some(100 + demands.len() as i32 % 3)),
            account_id: Set(Some(7)),
            role: Set(Some(role.to_string())),
            role_code: Set(Some(role_code.to_string())),
            location: Set(Some(location.to_string())),
            status: Set(Some(status.to_string())),
            revised: Set(None),
            probability: Set(Some(probability)),
            allocation_percentage: Set(Some(allocation)),
            billing_rate: Set(Some(rate)),
            original_start_date: Set(Some(start)),
            allocation_end_date: Set(Some(end)),
            fulfillment_date: Set(None),
            start_month: Set(Some(start.format("%Y-%m").to_string())),
            resource_mapped: Set(None),
            comment: Set(None),
            added_by: Set(Some("seed".to_string())),
            added_on: Set(Some(timestamp(2026, 7, 1))),
            last_updated_by: Set(Some("seed".to_string())),
            updated_on: Set(Some(timestamp(2026, 7, 15))),
        }
        .insert(db)
        .await?;
        demands.push(inserted);
    }

    let mut projects = Vec::new();
    for (name, budget, duration_weeks, progress, deadline, members) in [
        (
            "Website Revamp",
            120_000_i64,
            8,
            65,
            date(2026, 9, 25),
            &["Alice Johnson", "Carol Davis"][..],
        ),
        (
            "Billing Platform",
            250_000,
            16,
            40,
            date(2026, 11, 20),
            &["Bob Smith", "Carol Davis", "David Wilson"][..],
        ),
        (
            "Churn Model",
            90_000,
            6,
            80,
            date(2026, 8, 28),
            &["Emma Taylor"][..],
        ),
        (
            "Cluster Migration",
            180_000,
            12,
            25,
            date(2026, 12, 18),
            &["David Wilson", "Bob Smith"][..],
        ),
    ] {
        let inserted = project::ActiveModel {
            id: NotSet,
            name: Set(name.to_string()),
            budget: Set(budget),
            duration_weeks: Set(duration_weeks),
            progress: Set(progress),
            deadline: Set(deadline),
            team_members: Set(StringList::from(members)),
        }
        .insert(db)
        .await?;
        projects.push(inserted);
    }

    Ok(SeededRecords {
        employees,
        demands,
        projects,
    })
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid seed date")
}

fn timestamp(year: i32, month: u32, day: u32) -> chrono::DateTime<chrono::FixedOffset> {
    Utc.with_ymd_and_hms(year, month, day, 12, 0, 0)
        .single()
        .expect("valid seed timestamp")
        .into()
}
