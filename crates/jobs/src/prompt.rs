//! Prompt builders for zone analysis and Q&A.
//!
//! All prompts ask for HTML output since the generated text is stored and
//! rendered verbatim.

use ecowatch_core::ZoneRecord;

const IMPACT_SECTIONS: &str = "\
1. <h3>Immediate Environmental Impact (1-2 years)</h3>
   - Measurable effects on local ecosystems
   - Water quality, air quality and soil composition
   - Biodiversity and species populations, quantified where possible

2. <h3>Medium-Term Consequences (3-7 years)</h3>
   - Cascading ecological effects
   - Climate regulation and carbon sequestration
   - Local weather patterns and hydrology
   - Economic effects on nearby communities

3. <h3>Long-Term Ecological Trajectory (10-25 years)</h3>
   - Ecosystem state if current trends continue
   - Irreversible tipping points and thresholds
   - Regional extinction risk
   - Climate change amplification

4. <h3>Affected Wildlife & Ecosystems</h3>
   - Impact on each key species
   - Food web disruption and trophic cascades
   - Migration changes and habitat fragmentation

5. <h3>Human Health & Livelihood Impact</h3>
   - Public health consequences
   - Agriculture and food security
   - Displacement and migration pressure
   - Economic cost and poverty

6. <h3>Scientific Evidence & Data</h3>
   - Comparable case studies from other regions
   - Relevant ecological principles

7. <h3>Comprehensive Action Plan</h3>
   - Interventions within 6 months
   - Restoration strategies over 1-3 years
   - Conservation framework over 5-10 years
   - Policy recommendations and community engagement
   - Success metrics and monitoring";

/// Full impact assessment used by the batch enrichment job.
pub fn impact_prompt(zone: &ZoneRecord) -> String {
    format!(
        "Act as a senior environmental scientist with expertise in ecology, climate science and conservation biology.

Write a comprehensive environmental impact analysis for this risk zone.

Zone profile:
- Name: {name}
- Location: {lat}, {lng}
- Primary hazard: {hazard}
- Severity index: {importance}/10
- Current impact: {impact}
- Key species: {species}

Required sections:

{IMPACT_SECTIONS}

Format:
- HTML only, no markdown
- <h3> for section headers, <strong> for critical points, <ul>/<li> for lists
- Specific numbers and timeframes
- 800-1200 words in scientific but accessible language, useful to policymakers, conservationists and local communities
",
        name = zone.name,
        lat = zone.lat,
        lng = zone.lng,
        hazard = zone.hazard,
        importance = zone.importance,
        impact = zone.impact,
        species = zone.species_or("Various endemic species"),
    )
}

/// Short three-part analysis for on-demand requests.
pub fn analysis_prompt(zone: &ZoneRecord) -> String {
    format!(
        "Act as an environmental scientist. Analyze this environmental risk zone:

Zone name: {name}
Hazard type: {hazard}
Importance level: {importance}/10
Species affected: {species}
Current impact: {impact}

Respond with concise HTML (no markdown) containing:
1. <strong>Short-term Impact (1-5 years):</strong> immediate consequences
2. <strong>Long-term Impact (10+ years):</strong> consequences if unaddressed
3. <strong>Recommended Action:</strong> one specific, actionable solution

Keep it under 200 words.
",
        name = zone.name,
        hazard = zone.hazard,
        importance = zone.importance,
        species = zone.species_or("Various"),
        impact = zone.impact,
    )
}

pub fn question_prompt(question: &str) -> String {
    format!(
        "Act as an expert environmental scientist with deep knowledge of ecology, climate change and sustainability.

User question: \"{question}\"

Answer clearly and accurately in 2-3 sentences. Use HTML with <strong> tags for emphasis where useful.
"
    )
}
