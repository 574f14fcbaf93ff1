//! System instruction builder.
//!
//! The instruction template carries the conversational policy (persona,
//! question limit, formatting rules) and a `{catalog}` slot that receives the
//! pretty-printed catalog snapshot. The resulting system turn is rebuilt for
//! every request and never stored.

use concierge_types::catalog::CatalogSnapshot;
use concierge_types::chat::Turn;

/// Placeholder replaced by the catalog JSON.
pub const CATALOG_SLOT: &str = "{catalog}";

/// Default instruction template for the vacation-rental concierge.
pub const DEFAULT_TEMPLATE: &str = "\
You are the friendly concierge for Offbeat Retreats, a vacation rental company that specializes in quirky, unusual places to stay.

Your job is to guide the visitor through a SHORT conversation and match them with the perfect rental.

Available rentals:
{catalog}

CONVERSATION FLOW:
1. On the first message, greet the visitor warmly and ask ONE question about what they are looking for (type of experience, budget, group size, or special interests).
2. After they answer, ask at most ONE more follow-up question to narrow things down.
3. Then recommend the TOP 1-2 rentals from the list above that best match their answers, and explain WHY each one fits.

FORMAT YOUR RESPONSES:
- Separate sections with a blank line.
- Use bullet points (•) when listing rental features.
- Use an emoji now and then to add personality (🏡 ✨ 🎉).
- Keep sentences short, casual, and friendly, like texting a friend.
- Be enthusiastic about how unusual these rentals are!

Never ask more than two questions in total before making a recommendation.";

/// Builds the synthesized system turn from a template and the catalog.
#[derive(Debug, Clone)]
pub struct SystemPromptBuilder {
    template: String,
}

impl SystemPromptBuilder {
    /// Use a custom template. Every `{catalog}` occurrence receives the catalog;
    /// a template without the slot gets the catalog appended after a blank line.
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    /// Render the instruction text with the catalog interpolated.
    pub fn build(&self, catalog: &CatalogSnapshot) -> String {
        let catalog_json = catalog.to_pretty_json();
        if self.template.contains(CATALOG_SLOT) {
            self.template.replace(CATALOG_SLOT, &catalog_json)
        } else {
            format!("{}\n\n{catalog_json}", self.template.trim_end())
        }
    }

    /// The system turn prepended to an outbound request.
    pub fn system_turn(&self, catalog: &CatalogSnapshot) -> Turn {
        Turn::system(self.build(catalog))
    }
}

impl Default for SystemPromptBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_TEMPLATE)
    }
}
