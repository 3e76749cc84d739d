pub mod event_repo;

pub use event_repo::SqliteEventRepository;
