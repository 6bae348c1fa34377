use std::io;
use thiserror::Error;

use crate::orbit::MalformedOrbit;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to read orbit map: {0}")]
    Io(#[from] io::Error),

    #[error("Line {line}: {source}")]
    MalformedRecord {
        line: usize,
        #[source]
        source: MalformedOrbit,
    },

    #[error("{body} cannot orbit multiple bodies")]
    MultipleParents { body: String },

    #[error("{body} cannot orbit {centre}: {centre} already orbits {body}")]
    Cycle { body: String, centre: String },

    #[error("No body named {body} in the map")]
    UnknownBody { body: String },

    #[error("{body} does not orbit anything")]
    Unorbiting { body: String },
}

pub type Result<T> = std::result::Result<T, Error>;
