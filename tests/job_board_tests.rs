use storefront::jobs::{ApplicationForm, NewJob, NewJobAlert};
use storefront::local_storage::{FileStorage, KeyValueStore, JOB_APPLICATIONS_KEY, SAVED_JOBS_KEY};
use storefront::{JobBoard, JobQuery};

fn new_job() -> NewJob {
    NewJob {
        title: "Platform Engineer".into(),
        company: "Ferrous Systems".into(),
        location: "Berlin, DE".into(),
        job_type: Some("Contract".into()),
        category: "Technology".into(),
        salary: "$90,000 - $200,000".into(),
        description: "Run the build farm".into(),
        requirements: "Rust, Linux".into(),
        benefits: "Remote days".into(),
    }
}

#[test]
fn test_job_board_survives_reload_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let posted_id = {
        let mut board = JobBoard::load(FileStorage::open(dir.path()).unwrap());
        let job = board.post(new_job()).unwrap();
        board.save_job(&job).unwrap();
        board.create_alert(NewJobAlert { title: "Rust".into(), keywords: "rust".into(), ..Default::default() }).unwrap();
        let form = ApplicationForm { first_name: "Ada".into(), last_name: "Lovelace".into(), email: "ada@example.com".into(), ..Default::default() };
        board.apply(&job, form).unwrap();
        job.id
    };

    let board = JobBoard::load(FileStorage::open(dir.path()).unwrap());
    assert_eq!(board.posted().len(), 1);
    assert!(board.is_saved(&posted_id));
    assert_eq!(board.alerts().len(), 1);
    assert_eq!(board.applications()[0].job_id, posted_id);
    assert!(board.storage().get(SAVED_JOBS_KEY).unwrap().unwrap().contains("\"savedDate\""));
    assert!(board.storage().get(JOB_APPLICATIONS_KEY).unwrap().unwrap().contains("\"jobTitle\":\"Platform Engineer\""));
}

#[test]
fn test_search_spans_builtin_and_posted_jobs() {
    let dir = tempfile::tempdir().unwrap();
    let mut board = JobBoard::load(FileStorage::open(dir.path()).unwrap());
    board.post(new_job()).unwrap();

    let query = JobQuery { search: "ENGINEER".into(), sort: Some("salary-high".into()), ..Default::default() };
    let titles: Vec<String> = board.search(&query).into_iter().map(|j| j.title).collect();
    assert_eq!(titles, vec!["Platform Engineer", "Backend Engineer"]);

    let in_berlin = JobQuery { location: "berlin".into(), job_type: "Contract".into(), ..Default::default() };
    assert_eq!(board.search(&in_berlin).len(), 1);
}
