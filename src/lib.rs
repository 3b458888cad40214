pub mod core {
    pub mod config;
    pub mod error;
    pub mod executor;
    pub mod runner;
    pub mod tracing_init;
}

pub mod api {
    pub mod client;
    pub mod manager;
}

pub mod engine {
    pub mod budget;
    pub mod classifier;
    pub mod plan;
}

pub mod models {
    pub mod action;
    pub mod torrent;
}

pub mod storage {
    pub mod free_space;
}

pub mod utils {
    pub mod format;
}
