/// Which prompt pair and token budget govern a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisMode {
    /// Complete report: score, risk, keywords, improvements.
    Full,
    /// Lightweight re-score after the user edits the résumé.
    Score,
}

impl AnalysisMode {
    /// Name recorded in the `feature` column of the call log.
    pub fn feature(&self) -> &'static str {
        match self {
            AnalysisMode::Full => "full",
            AnalysisMode::Score => "score",
        }
    }

    pub fn system_prompt_name(&self) -> &'static str {
        match self {
            AnalysisMode::Full => "full_system",
            AnalysisMode::Score => "score_system",
        }
    }

    pub fn template_prompt_name(&self) -> &'static str {
        match self {
            AnalysisMode::Full => "full_template",
            AnalysisMode::Score => "score_template",
        }
    }

    /// Full reports carry long improvement lists; a re-score is a number and a sentence.
    pub fn max_tokens(&self) -> u32 {
        match self {
            AnalysisMode::Full => 1500,
            AnalysisMode::Score => 500,
        }
    }
}
