//! Prompt assembly for the completion backend. All prompts demand a single
//! JSON value in the response; parsing tolerates surrounding prose anyway.

use crate::content::formula::strategy_guide;
use crate::content::sanitize::{MAX_THREAD_POSTS, MIN_THREAD_POSTS};
use crate::content::types::{GeneratedPost, ProductInfo, TargetPersona, Tone};

/// Grounding block built from the product link and its crawled digest.
/// Empty when the user supplied no link.
pub fn reference_block(product: &ProductInfo) -> String {
    let link = product.link.trim();
    if link.is_empty() {
        return String::new();
    }

    let title = product
        .reference_title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty());
    let context = product
        .reference_context
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .unwrap_or("(none)");

    let mut block = format!("Reference link: {link}\n");
    if let Some(title) = title {
        block.push_str(&format!("Reference page title: {title}\n"));
    }
    block.push_str(&format!(
        "Crawled page digest:\n{context}\n\n\
         Grounding rules:\n\
         - Base factual claims on the digest above; never invent specs or prices.\n\
         - If the digest is silent on a detail, describe the product generically instead of guessing.\n"
    ));
    block
}

/// Ask for target-reader personas as a bare JSON array.
pub fn persona_prompt(product: &ProductInfo) -> String {
    format!(
        "You are a marketing strategist. Propose exactly 4 distinct target reader \
         personas for the product below.\n\n\
         Product name: {}\n\
         Product description: {}\n\n{}\
         Respond with a JSON array only, no surrounding text. Each element:\n\
         {{\"id\": \"1\", \"title\": \"short group name\", \"description\": \"one sentence\", \
         \"icon\": \"one emoji\", \"recommendedTone\": \"professional|friendly|heartfelt\"}}",
        product.name, product.description, reference_block(product)
    )
}

/// Ask for a blog post shaped hook/story/offer, with inline image markers.
pub fn blog_prompt(product: &ProductInfo, persona: &TargetPersona, tone: Tone) -> String {
    format!(
        "Write a marketing blog post in English.\n\n\
         Product name: {}\n\
         Product description: {}\n\
         Target reader: {} ({})\n\
         Tone: {tone}\n\n{}\
         Structure the body as hook, story, offer, in that order, but never print \
         those words as headings or labels.\n\
         Insert 3 to 4 image placeholders inline as [IMAGE: short scene description].\n\
         Suggest exactly 3 titles; put the strongest first.\n\
         Suggest 5 to 8 hashtags without the # prefix.\n\n\
         Respond with a JSON object only, no surrounding text:\n\
         {{\"titles\": [\"...\", \"...\", \"...\"], \"content\": \"...\", \
         \"hashtags\": [\"...\"]}}",
        product.name,
        product.description,
        persona.title,
        persona.description,
        reference_block(product)
    )
}

/// Ask for a short-form thread following a deterministically selected
/// formula.
pub fn thread_prompt(product: &ProductInfo, persona: &TargetPersona, tone: Tone) -> String {
    let seed = format!("{}|{}|{tone}", product.name, persona.title);
    format!(
        "Write a short-form social thread in English.\n\n\
         Product name: {}\n\
         Product description: {}\n\
         Target reader: {} ({})\n\
         Tone: {tone}\n\n{}\
         {}\n\n\
         Produce {MIN_THREAD_POSTS} to {MAX_THREAD_POSTS} posts. Aim for about 220 \
         characters per post and never exceed 280. Do not number the posts.\n\
         Suggest 3 to 5 hashtags without the # prefix.\n\n\
         Respond with a JSON object only, no surrounding text:\n\
         {{\"threads\": [\"...\"], \"hashtags\": [\"...\"]}}",
        product.name,
        product.description,
        persona.title,
        persona.description,
        reference_block(product),
        strategy_guide(&seed)
    )
}

/// Ask for a blog post to be recast as a thread.
pub fn blog_to_thread_prompt(post: &GeneratedPost, tone: Tone) -> String {
    let seed = format!("{}|{tone}", post.titles.join("|"));
    format!(
        "Recast the blog post below as a short-form social thread in English, \
         keeping its facts and claims intact.\n\n\
         Blog titles: {}\n\
         Blog body:\n{}\n\n\
         Tone: {tone}\n\n\
         {}\n\n\
         Produce {MIN_THREAD_POSTS} to {MAX_THREAD_POSTS} posts. Aim for about 220 \
         characters per post and never exceed 280. Do not number the posts. \
         Drop any [IMAGE: ...] markers.\n\n\
         Respond with a JSON object only, no surrounding text:\n\
         {{\"threads\": [\"...\"], \"hashtags\": [\"...\"]}}",
        post.titles.join(" | "),
        post.content,
        strategy_guide(&seed)
    )
}

/// Ask for thread posts to be expanded into a blog post. `clean_threads`
/// must already have their numbering prefixes removed.
pub fn thread_to_blog_prompt(clean_threads: &[String], tone: Tone) -> String {
    format!(
        "Expand the social thread below into a full marketing blog post in \
         English, keeping its facts and claims intact.\n\n\
         Thread posts:\n{}\n\n\
         Tone: {tone}\n\n\
         Structure the body as hook, story, offer, in that order, but never print \
         those words as headings or labels.\n\
         Insert 3 to 4 image placeholders inline as [IMAGE: short scene description].\n\
         Suggest exactly 3 titles; put the strongest first.\n\
         Suggest 5 to 8 hashtags without the # prefix.\n\n\
         Respond with a JSON object only, no surrounding text:\n\
         {{\"titles\": [\"...\", \"...\", \"...\"], \"content\": \"...\", \
         \"hashtags\": [\"...\"]}}",
        clean_threads.join("\n---\n")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product() -> ProductInfo {
        ProductInfo {
            name: "Standing desk".into(),
            link: "https://shop.example/desk".into(),
            description: "Height adjustable desk".into(),
            reference_title: Some("Desk product page".into()),
            reference_context: Some("URL: https://shop.example/desk\nTitle: Desk".into()),
        }
    }

    fn persona() -> TargetPersona {
        TargetPersona {
            id: "1".into(),
            title: "Remote workers".into(),
            description: "People working from home all day".into(),
            icon: "💻".into(),
            recommended_tone: Tone::Friendly,
        }
    }

    #[test]
    fn reference_block_is_empty_without_a_link() {
        let mut p = product();
        p.link = "   ".into();
        assert!(reference_block(&p).is_empty());
    }

    #[test]
    fn reference_block_marks_missing_digest() {
        let mut p = product();
        p.reference_context = None;
        let block = reference_block(&p);
        assert!(block.contains("(none)"));
        assert!(block.contains("Desk product page"));
    }

    #[test]
    fn blog_prompt_carries_product_persona_and_grounding() {
        let prompt = blog_prompt(&product(), &persona(), Tone::Professional);
        assert!(prompt.contains("Standing desk"));
        assert!(prompt.contains("Remote workers"));
        assert!(prompt.contains("Tone: professional"));
        assert!(prompt.contains("Crawled page digest:"));
        assert!(prompt.contains("\"titles\""));
    }

    #[test]
    fn thread_prompt_embeds_a_formula() {
        let prompt = thread_prompt(&product(), &persona(), Tone::Friendly);
        assert!(prompt.contains("Thread formula to apply:"));
        assert!(prompt.contains("Writing rules:"));
        assert!(prompt.contains("\"threads\""));
    }

    #[test]
    fn thread_prompt_is_deterministic_per_inputs() {
        let a = thread_prompt(&product(), &persona(), Tone::Friendly);
        let b = thread_prompt(&product(), &persona(), Tone::Friendly);
        assert_eq!(a, b);
    }

    #[test]
    fn conversion_prompts_include_the_source_material() {
        let post = GeneratedPost {
            titles: vec!["The best desk".into()],
            content: "Body text.".into(),
            hashtags: vec!["#desk".into()],
            threads: vec![],
            primary_format: crate::content::types::ContentFormat::Blog,
        };
        let to_thread = blog_to_thread_prompt(&post, Tone::Heartfelt);
        assert!(to_thread.contains("The best desk"));
        assert!(to_thread.contains("Body text."));

        let to_blog =
            thread_to_blog_prompt(&["First post".into(), "Second post".into()], Tone::Friendly);
        assert!(to_blog.contains("First post\n---\nSecond post"));
    }
}
