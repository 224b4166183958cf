pub mod mcf;
