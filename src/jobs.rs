//! Job board kept in client-local storage.
//!
//! Built-in listings plus jobs posted from this client, saved jobs, job
//! alerts and submitted applications. Each collection is a JSON array under
//! its own key (see [`crate::local_storage`]) and is rewritten on every change.

use std::cmp::Ordering;

use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

use crate::local_storage::{
    Identified, KeyValueStore, ListError, StoredList, JOB_ALERTS_KEY, JOB_APPLICATIONS_KEY, POSTED_JOBS_KEY, SAVED_JOBS_KEY,
};

pub const SALARY_NOT_SPECIFIED: &str = "Salary not specified";
pub const DEFAULT_JOB_TYPE: &str = "Full-time";
pub const DEFAULT_ALERT_FREQUENCY: &str = "Daily";
pub const ANY_LOCATION: &str = "Any";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    /// "Full-time", "Part-time", "Contract", ...
    #[serde(rename = "type")]
    pub job_type: String,
    /// Free text such as "$120,000 - $150,000".
    pub salary: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub requirements: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub benefits: String,
    pub posted_date: NaiveDate,
    pub category: String,
}

impl Identified for Job {
    fn id(&self) -> &str { &self.id }
}

/// The post-a-job form.
#[derive(Clone, Debug, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewJob {
    #[validate(length(min = 1, message = "Job title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Company is required"))]
    pub company: String,
    #[validate(length(min = 1, message = "Location is required"))]
    pub location: String,
    #[serde(default, rename = "type")]
    pub job_type: Option<String>,
    #[validate(length(min = 1, message = "Category is required"))]
    pub category: String,
    #[serde(default)]
    pub salary: String,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    #[validate(length(min = 1, message = "Requirements are required"))]
    pub requirements: String,
    #[serde(default)]
    pub benefits: String,
}

impl Job {
    pub fn create(new: NewJob, posted_date: NaiveDate) -> Self {
        let salary = if new.salary.trim().is_empty() { SALARY_NOT_SPECIFIED.to_string() } else { new.salary };
        Self {
            id: Uuid::new_v4().to_string(),
            title: new.title,
            company: new.company,
            location: new.location,
            job_type: new.job_type.filter(|t| !t.is_empty()).unwrap_or_else(|| DEFAULT_JOB_TYPE.to_string()),
            salary,
            description: new.description,
            requirements: new.requirements,
            benefits: new.benefits,
            posted_date,
            category: new.category,
        }
    }

    /// Case-insensitive substring match over title and company.
    pub fn matches(&self, needle_lower: &str) -> bool {
        self.title.to_lowercase().contains(needle_lower) || self.company.to_lowercase().contains(needle_lower)
    }

    pub fn salary_figure(&self) -> u64 { salary_figure(&self.salary) }
}

/// Upper end of a salary text: the last number in it, thousands separators
/// ignored. Text without digits counts as zero.
pub fn salary_figure(salary: &str) -> u64 {
    let digits_only: String = salary.chars().filter(|c| *c != ',').collect();
    digits_only
        .split(|c: char| !c.is_ascii_digit())
        .filter(|run| !run.is_empty())
        .last()
        .map(|run| run.parse().unwrap_or(u64::MAX))
        .unwrap_or(0)
}

const SAMPLE_JOBS: &[(&str, &str, &str, &str, &str, &str, &str, (i32, u32, u32), &str)] = &[
    ("1", "Senior Frontend Developer", "TechCorp Inc.", "San Francisco, CA", "Full-time", "$120,000 - $150,000",
     "We are looking for an experienced frontend developer to join our team...", (2024, 1, 15), "Technology"),
    ("2", "Product Manager", "StartupXYZ", "Remote", "Full-time", "$100,000 - $130,000",
     "Lead product strategy and development for our innovative platform...", (2024, 1, 14), "Product"),
    ("3", "UX Designer", "Design Studio", "New York, NY", "Contract", "$80,000 - $100,000",
     "Create beautiful and intuitive user experiences...", (2024, 1, 13), "Design"),
    ("4", "Backend Engineer", "CloudTech", "Austin, TX", "Full-time", "$110,000 - $140,000",
     "Build scalable backend systems and APIs...", (2024, 1, 12), "Technology"),
];

/// Built-in listings shown ahead of posted jobs.
pub fn sample_jobs() -> Vec<Job> {
    SAMPLE_JOBS.iter()
        .filter_map(|&(id, title, company, location, job_type, salary, description, (y, m, d), category)| {
            Some(Job {
                id: id.into(),
                title: title.into(),
                company: company.into(),
                location: location.into(),
                job_type: job_type.into(),
                salary: salary.into(),
                description: description.into(),
                requirements: String::new(),
                benefits: String::new(),
                posted_date: NaiveDate::from_ymd_opt(y, m, d)?,
                category: category.into(),
            })
        })
        .collect()
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JobSort {
    /// Most recently posted first.
    #[default]
    Date,
    SalaryHigh,
    SalaryLow,
}

impl JobSort {
    /// Unrecognised names fall back to `Date`.
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "salary-high" => Self::SalaryHigh,
            "salary-low" => Self::SalaryLow,
            _ => Self::Date,
        }
    }

    fn compare(&self, a: &Job, b: &Job) -> Ordering {
        match self {
            Self::Date => b.posted_date.cmp(&a.posted_date),
            Self::SalaryHigh => b.salary_figure().cmp(&a.salary_figure()),
            Self::SalaryLow => a.salary_figure().cmp(&b.salary_figure()),
        }
    }
}

/// Job list filters. Empty fields match everything.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct JobQuery {
    /// Substring of the title or company.
    pub search: String,
    /// Substring of the location.
    pub location: String,
    /// Exact category.
    pub category: String,
    /// Exact job type.
    #[serde(rename = "type")]
    pub job_type: String,
    pub sort: Option<String>,
}

impl JobQuery {
    pub fn matches(&self, job: &Job) -> bool {
        let location = self.location.to_lowercase();
        job.matches(&self.search.to_lowercase())
            && (location.is_empty() || job.location.to_lowercase().contains(&location))
            && (self.category.is_empty() || job.category == self.category)
            && (self.job_type.is_empty() || job.job_type == self.job_type)
    }

    /// Filters then sorts; the sort is stable.
    pub fn apply(&self, jobs: &[Job]) -> Vec<Job> {
        let mode = self.sort.as_deref().map(JobSort::parse).unwrap_or_default();
        let mut found: Vec<Job> = jobs.iter().filter(|j| self.matches(j)).cloned().collect();
        found.sort_by(|a, b| mode.compare(a, b));
        found
    }
}

/// Bookmark of a listing, copied at the moment it was saved.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedJob {
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub salary: String,
    pub saved_date: DateTime<Utc>,
}

impl Identified for SavedJob {
    fn id(&self) -> &str { &self.id }
}

impl From<&Job> for SavedJob {
    fn from(job: &Job) -> Self {
        Self {
            id: job.id.clone(),
            title: job.title.clone(),
            company: job.company.clone(),
            location: job.location.clone(),
            salary: job.salary.clone(),
            saved_date: Utc::now(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobAlert {
    pub id: String,
    pub title: String,
    /// Comma-separated, as typed.
    pub keywords: String,
    pub location: String,
    pub frequency: String,
    pub is_active: bool,
}

impl Identified for JobAlert {
    fn id(&self) -> &str { &self.id }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewJobAlert {
    pub title: String,
    pub keywords: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub frequency: String,
}

impl JobAlert {
    /// Title and keywords must be non-blank. New alerts start active.
    pub fn create(new: NewJobAlert) -> Result<Self, JobError> {
        if new.title.trim().is_empty() || new.keywords.trim().is_empty() { return Err(JobError::IncompleteAlert); }
        let or_default = |v: String, default: &str| if v.trim().is_empty() { default.to_string() } else { v };
        Ok(Self {
            id: Uuid::new_v4().to_string(),
            title: new.title,
            keywords: new.keywords,
            location: or_default(new.location, ANY_LOCATION),
            frequency: or_default(new.frequency, DEFAULT_ALERT_FREQUENCY),
            is_active: true,
        })
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApplicationStatus {
    #[default]
    Applied,
    #[serde(rename = "Under Review")]
    UnderReview,
    Interview,
    Rejected,
    Accepted,
}

/// The apply-for-this-job form. Resume upload is not stored.
#[derive(Clone, Debug, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationForm {
    #[validate(length(min = 1, message = "First name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "Last name is required"))]
    pub last_name: String,
    #[validate(email(message = "Valid email is required"))]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub cover_letter: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobApplication {
    pub id: String,
    pub job_id: String,
    pub job_title: String,
    pub company: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub cover_letter: String,
    pub applied_date: DateTime<Utc>,
    #[serde(default)]
    pub status: ApplicationStatus,
}

impl Identified for JobApplication {
    fn id(&self) -> &str { &self.id }
}

#[derive(Debug, thiserror::Error)]
pub enum JobError {
    #[error("Invalid form: {0}")]
    Invalid(#[from] ValidationErrors),
    #[error("Alert needs a title and keywords")]
    IncompleteAlert,
    #[error(transparent)]
    Storage(#[from] ListError),
}

/// All job-board collections over one store.
#[derive(Debug)]
pub struct JobBoard<S: KeyValueStore> {
    storage: S,
    posted: StoredList<Job>,
    saved: StoredList<SavedJob>,
    alerts: StoredList<JobAlert>,
    applications: StoredList<JobApplication>,
}

impl<S: KeyValueStore> JobBoard<S> {
    pub fn load(storage: S) -> Self {
        Self {
            posted: StoredList::load(POSTED_JOBS_KEY, &storage),
            saved: StoredList::load(SAVED_JOBS_KEY, &storage),
            alerts: StoredList::load(JOB_ALERTS_KEY, &storage),
            applications: StoredList::load(JOB_APPLICATIONS_KEY, &storage),
            storage,
        }
    }

    pub fn storage(&self) -> &S { &self.storage }
    pub fn into_storage(self) -> S { self.storage }

    /// Built-in listings followed by posted jobs in posting order.
    pub fn listings(&self) -> Vec<Job> {
        let mut jobs = sample_jobs();
        jobs.extend(self.posted.items().iter().cloned());
        jobs
    }

    pub fn search(&self, query: &JobQuery) -> Vec<Job> { query.apply(&self.listings()) }

    pub fn find(&self, id: &str) -> Option<Job> { self.listings().into_iter().find(|j| j.id == id) }

    pub fn posted(&self) -> &[Job] { self.posted.items() }

    /// Posts a job dated today in the local timezone.
    pub fn post(&mut self, new: NewJob) -> Result<Job, JobError> {
        self.post_on(new, Local::now().date_naive())
    }

    pub fn post_on(&mut self, new: NewJob, posted_date: NaiveDate) -> Result<Job, JobError> {
        new.validate()?;
        let job = Job::create(new, posted_date);
        self.posted.append(&mut self.storage, job.clone())?;
        tracing::info!(job_id = %job.id, title = %job.title, "Job posted");
        Ok(job)
    }

    pub fn saved_jobs(&self) -> &[SavedJob] { self.saved.items() }

    pub fn is_saved(&self, job_id: &str) -> bool { self.saved.contains(job_id) }

    /// Saves `job` unless it is already saved. Returns whether it was added.
    pub fn save_job(&mut self, job: &Job) -> Result<bool, JobError> {
        if self.saved.contains(&job.id) { return Ok(false); }
        self.saved.append(&mut self.storage, SavedJob::from(job))?;
        Ok(true)
    }

    /// Saves or unsaves `job`. Returns whether it is saved afterwards.
    pub fn toggle_saved(&mut self, job: &Job) -> Result<bool, JobError> {
        Ok(self.saved.toggle(&mut self.storage, SavedJob::from(job))?)
    }

    pub fn unsave_job(&mut self, job_id: &str) -> Result<bool, JobError> {
        Ok(self.saved.remove(&mut self.storage, job_id)?)
    }

    pub fn alerts(&self) -> &[JobAlert] { self.alerts.items() }

    pub fn create_alert(&mut self, new: NewJobAlert) -> Result<JobAlert, JobError> {
        let alert = JobAlert::create(new)?;
        self.alerts.append(&mut self.storage, alert.clone())?;
        Ok(alert)
    }

    /// Flips `is_active`. `None` when no alert has that id.
    pub fn toggle_alert(&mut self, id: &str) -> Result<Option<bool>, JobError> {
        let mut active = None;
        self.alerts.update(&mut self.storage, id, |a| {
            a.is_active = !a.is_active;
            active = Some(a.is_active);
        })?;
        Ok(active)
    }

    pub fn delete_alert(&mut self, id: &str) -> Result<bool, JobError> {
        Ok(self.alerts.remove(&mut self.storage, id)?)
    }

    pub fn applications(&self) -> &[JobApplication] { self.applications.items() }

    pub fn apply(&mut self, job: &Job, form: ApplicationForm) -> Result<JobApplication, JobError> {
        form.validate()?;
        let application = JobApplication {
            id: Uuid::new_v4().to_string(),
            job_id: job.id.clone(),
            job_title: job.title.clone(),
            company: job.company.clone(),
            first_name: form.first_name,
            last_name: form.last_name,
            email: form.email,
            phone: form.phone,
            cover_letter: form.cover_letter,
            applied_date: Utc::now(),
            status: ApplicationStatus::Applied,
        };
        self.applications.append(&mut self.storage, application.clone())?;
        tracing::info!(job_id = %job.id, application_id = %application.id, "Application submitted");
        Ok(application)
    }
}
