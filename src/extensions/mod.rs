pub mod duration_ext;
