//! Test support.


pub(crate) use db::TestDb;
pub(crate) use memory::InMemoryTokensRepository;
