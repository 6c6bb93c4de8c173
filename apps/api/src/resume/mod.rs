// Resume intake: upload handling and PDF text extraction.
// No LLM calls here — analysis of the extracted text lives in `analysis`.

pub mod extract;
