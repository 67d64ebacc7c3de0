//! svgfont command line library.

pub mod cli;
