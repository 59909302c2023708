mod run;

pub use run::run_gbfs_download;
