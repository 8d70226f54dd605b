use rolodex::Catalog;

pub mod companies;
pub mod discover;
pub mod health;
pub mod search;
pub mod tags;

pub struct AppState {
    pub catalog: Catalog,
}
