pub mod db;
pub mod restaurant {
    pub mod dataset;
    pub mod entity;
    pub mod json_file;
    pub mod repository;
}
