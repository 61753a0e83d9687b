//! Archive packagers.

mod tar_gz;

pub use tar_gz::TarGzPackager;
