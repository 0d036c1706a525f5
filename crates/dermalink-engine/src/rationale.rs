//! Deterministic rationale templates.
//!
//! The fallback voice of the system: when the reasoning service is disabled,
//! times out, or gets rejected by the hallucination guard, rationale strings
//! come from these per-language, per-role templates — parameterized text,
//! never free generation.

use dermalink_core::models::language::Language;
use dermalink_core::models::profile::PatientProfile;
use dermalink_core::models::protocol::ProtocolRecord;
use dermalink_core::models::recommendation::RankRole;

/// Render the deterministic rationale for one recommendation slot.
pub fn deterministic_rationale(
    profile: &PatientProfile,
    record: &ProtocolRecord,
    role: RankRole,
) -> String {
    template_for(profile.language, role)
        .replace("{name}", &record.name)
        .replace("{goal}", &profile.primary_goal)
        .replace("{pain}", profile.pain_tolerance.label())
        .replace("{downtime}", profile.downtime_tolerance.label())
}

fn template_for(language: Language, role: RankRole) -> &'static str {
    match (language, role) {
        (Language::En, RankRole::ClinicalFit) => {
            "Based on your {goal} goal and your {pain} pain / {downtime} downtime preferences, \
             {name} is the strongest clinical alignment in the current catalog."
        }
        (Language::En, RankRole::TrendingMatch) => {
            "{name} pairs well with your {goal} goal and is currently one of the most requested \
             protocols."
        }
        (Language::En, RankRole::StretchGoal) => {
            "{name} sits one step beyond your declared {pain} pain / {downtime} downtime comfort \
             zone, but offers extra headroom on your {goal} goal if you are open to it."
        }
        (Language::Ko, RankRole::ClinicalFit) => {
            "고객님의 {goal} 목표와 통증({pain})·다운타임({downtime}) 선호도를 고려하여 {name} 프로토콜을 최우선으로 선정했습니다."
        }
        (Language::Ko, RankRole::TrendingMatch) => {
            "{name}은(는) 현재 가장 수요가 높은 시술 중 하나로, {goal} 개선 목표와도 잘 맞습니다."
        }
        (Language::Ko, RankRole::StretchGoal) => {
            "{name}은(는) 선호하신 범위보다 한 단계 높은 시술이지만, {goal} 효과를 극대화할 수 있는 옵션입니다."
        }
        (Language::Jp, RankRole::ClinicalFit) => {
            "お客様の{goal}という目標と、痛み({pain})・ダウンタイム({downtime})のご希望に基づき、{name}を第一候補として選定しました。"
        }
        (Language::Jp, RankRole::TrendingMatch) => {
            "{name}は現在最も人気の高い施術のひとつで、{goal}の目標にも適しています。"
        }
        (Language::Jp, RankRole::StretchGoal) => {
            "{name}はご希望の範囲より一段階上の施術ですが、{goal}の効果をさらに高められる選択肢です。"
        }
        (Language::Cn, RankRole::ClinicalFit) => {
            "基于您的{goal}目标以及疼痛({pain})和恢复期({downtime})偏好，我们将{name}列为首选方案。"
        }
        (Language::Cn, RankRole::TrendingMatch) => {
            "{name}是目前需求最高的方案之一，同时契合您的{goal}目标。"
        }
        (Language::Cn, RankRole::StretchGoal) => {
            "{name}略高于您声明的耐受范围一级，但若您愿意尝试，可为{goal}带来更大提升。"
        }
    }
}
