//! Prompt construction for the completion call.
//!
//! The instruction text is a policy constraint on the downstream model,
//! not something enforced programmatically; this module's responsibility
//! ends at producing a prompt whose text encodes it.

/// Role definition restricting the model to the supplied data, including
/// the fixed refusal phrase for absent data.
const ROLE_INSTRUCTION: &str = "The role of this model is to provide tailored company analysis. \
It leverages detailed company data to provide insights only from the data provided with this prompt. \
If specific data context is absent, respond with: 'I am not equipped with data to address that issue.'";

pub const QUERY_BEGIN: &str = "USER QUERY Begins :";
pub const QUERY_END: &str = "USER QUERY Ends";

const INSTRUCTIONS: &str = "Instructions to follow: \
1. Do not generate predictions. \
2. Along with outputting raw data; focus on summarizing insights. \
3. Format all output in a clear, human-readable manner. \
4. Ensure data accuracy and prioritize sorting by the latest year first. \
5. Provide clear guidance on interpreting and processing the dataset. \
6. Offer actionable insights without speculative analysis. \
7. If data is missing or incomplete, inform the user and suggest alternative sources or actions. \
8. Clearly go through data and provide the most relevant data (not necessarily the exact one needed).";

/// Build the final prompt: role constraints, grounding context, the user
/// query wrapped in explicit markers, and the fixed instruction list.
///
/// The query is embedded verbatim, whatever it contains.
pub fn build(context: &str, query: &str) -> String {
    let mut prompt = String::with_capacity(
        ROLE_INSTRUCTION.len() + context.len() + query.len() + INSTRUCTIONS.len() + 64,
    );
    prompt.push_str(ROLE_INSTRUCTION);
    prompt.push(' ');
    prompt.push_str(context);
    prompt.push(' ');
    prompt.push_str(QUERY_BEGIN);
    prompt.push_str(query);
    prompt.push(' ');
    prompt.push_str(QUERY_END);
    prompt.push(' ');
    prompt.push_str(INSTRUCTIONS);
    prompt
}
