//! Prompt construction for site generation.

use crate::models::business::BusinessDescription;

/// Build the instruction sent to the generative service.
///
/// Pure and deterministic. It does not validate its input: an incomplete
/// description simply yields an incomplete prompt.
pub fn build_prompt(description: &BusinessDescription) -> String {
    // Struct field order keeps the JSON stable between calls
    let details = serde_json::to_string_pretty(description).unwrap_or_default();
    let name = description.business_name();
    let kind = match description.business_type() {
        "" => "small business",
        kind => kind,
    };
    let color = description.primary_color();
    let email = description.email();
    let phone = description.phone();

    format!(
        r#"You are a senior front-end developer who builds modern, responsive small-business websites with Tailwind CSS.
Create one complete, single-file HTML page for "{name}", a {kind}, described by this JSON:
{details}

Follow every rule below.

1. Document: return one full HTML5 document. The very first characters must be `<!DOCTYPE html>` and the very last must be `</html>`.
2. Styling: load Tailwind CSS from its CDN with a script tag inside `<head>`. Style everything with Tailwind utility classes on the elements themselves. Do not write `<style>` blocks and do not use `style=""` attributes.
3. Colors: the brand's primary color is `{color}`. Use it for the most prominent elements: buttons, headings, links and their hover states. Keep text and backgrounds in a neutral gray palette (for example `text-gray-800` on `bg-gray-50`).
4. Layout: the page must be responsive and contain these sections, in this order:
   a. A header showing the business name.
   b. A hero section with a large headline and a call-to-action button.
   c. An "Our Services" section listing every service with its name, price and duration, laid out as a grid or flex row.
   d. An "About Us" / contact section showing the email address `{email}` and the phone number `{phone}`.
   e. A footer.
5. Output: respond with the raw HTML only. No explanations, no HTML comments, and no markdown such as ```html fences.
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::business::{Branding, Contact, ServiceOffering};

    fn barber_shop() -> BusinessDescription {
        BusinessDescription {
            business_name: Some("Dan's Barber Shop".into()),
            business_type: Some("Barber Shop".into()),
            branding: Some(Branding {
                primary_color: Some("#059669".into()),
            }),
            contact: Some(Contact {
                email: Some("contact@dansbarbers.com".into()),
                phone: Some("555-123-4567".into()),
            }),
            services: vec![ServiceOffering {
                name: "Men's Haircut".into(),
                price: "45".into(),
                duration: "30".into(),
            }],
        }
    }

    #[test]
    fn prompt_is_deterministic() {
        assert_eq!(build_prompt(&barber_shop()), build_prompt(&barber_shop()));
    }

    #[test]
    fn prompt_embeds_business_details() {
        let prompt = build_prompt(&barber_shop());

        assert!(prompt.contains("\"businessName\": \"Dan's Barber Shop\""));
        assert!(prompt.contains("\"primaryColor\": \"#059669\""));
        assert!(prompt.contains("contact@dansbarbers.com"));
        assert!(prompt.contains("555-123-4567"));
        assert!(prompt.contains("Men's Haircut"));
        assert!(prompt.contains("primary color is `#059669`"));
        assert!(prompt.contains("\"Dan's Barber Shop\", a Barber Shop"));
        assert!(prompt.contains("email address `contact@dansbarbers.com`"));
    }

    #[test]
    fn prompt_states_output_rules() {
        let prompt = build_prompt(&barber_shop());

        assert!(prompt.contains("`<!DOCTYPE html>`"));
        assert!(prompt.contains("`</html>`"));
        assert!(prompt.contains("Tailwind CSS from its CDN"));
        assert!(prompt.contains("Do not write `<style>` blocks"));
        assert!(prompt.contains("raw HTML only"));
    }

    #[test]
    fn sections_are_listed_in_order() {
        let prompt = build_prompt(&barber_shop());
        let positions: Vec<usize> = ["a. A header", "b. A hero", "c. An \"Our Services\"", "d. An \"About Us\"", "e. A footer"]
            .iter()
            .map(|s| prompt.find(s).unwrap())
            .collect();

        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn incomplete_description_still_builds() {
        let prompt = build_prompt(&BusinessDescription::default());
        assert!(prompt.contains("primary color is ``"));
        assert!(prompt.contains("a small business"));
    }
}
