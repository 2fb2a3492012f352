use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to load OBJ file {path}: {source}")]
    Obj {
        path: String,
        #[source]
        source: tobj::LoadError,
    },

    #[error("mesh {0} contains no triangles")]
    EmptyMesh(String),

    #[error("mesh {path} references vertex {index} but only has {count}")]
    IndexOutOfRange {
        path: String,
        index: u32,
        count: usize,
    },
}
