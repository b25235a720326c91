//! End-to-end scenarios across loaders, splitter and processor.

mod pipeline;
