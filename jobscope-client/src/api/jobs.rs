//! Skill and job directory lookups. Every endpoint takes a `lang` query
//! parameter (`en` when the caller passes `None`) and at most one identifier.

use jobscope_i18n::Locale;
use serde::Serialize;
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::client::ApiClient;
use crate::error::ApiError;

#[derive(Debug, Serialize, Validate)]
struct LangQuery {
    lang: &'static str,
}

#[derive(Debug, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
struct SkillQuery<'a> {
    lang: &'static str,
    #[validate(length(min = 1))]
    id: &'a str,
}

#[derive(Debug, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
struct MajorGroupQuery<'a> {
    lang: &'static str,
    #[validate(length(min = 1))]
    major_group_code: &'a str,
}

#[derive(Debug, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
struct UnitGroupQuery<'a> {
    lang: &'static str,
    #[validate(length(min = 1))]
    unit_group_code: &'a str,
}

#[derive(Debug, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
struct UnitGroupTitleQuery<'a> {
    lang: &'static str,
    #[validate(length(min = 1))]
    unit_group_title: &'a str,
}

/// Tag sent as `lang`; `en` when none is given.
fn lang(locale: Option<Locale>) -> &'static str {
    locale.unwrap_or_default().tag()
}

impl ApiClient {
    /// `GET /api/skill/getSkillLevelByLang`
    pub async fn skill_levels<T: DeserializeOwned>(
        &self,
        locale: Option<Locale>,
    ) -> Result<T, ApiError> {
        let query = LangQuery { lang: lang(locale) };
        self.get_checked("/api/skill/getSkillLevelByLang", &query)
            .await
    }

    /// `GET /api/skill/getSkillLevelByLangAndId`
    pub async fn skill_level<T: DeserializeOwned>(
        &self,
        locale: Option<Locale>,
        id: &str,
    ) -> Result<T, ApiError> {
        let query = SkillQuery {
            lang: lang(locale),
            id,
        };
        self.get_checked("/api/skill/getSkillLevelByLangAndId", &query)
            .await
    }

    /// `GET /api/job/getJobListByLangAndMajorGroupCode`
    pub async fn jobs_by_major_group<T: DeserializeOwned>(
        &self,
        locale: Option<Locale>,
        major_group_code: &str,
    ) -> Result<T, ApiError> {
        let query = MajorGroupQuery {
            lang: lang(locale),
            major_group_code,
        };
        self.get_checked("/api/job/getJobListByLangAndMajorGroupCode", &query)
            .await
    }

    /// `GET /api/job/getDetailJobByLangAndUnitGroupCode`
    pub async fn job_detail<T: DeserializeOwned>(
        &self,
        locale: Option<Locale>,
        unit_group_code: &str,
    ) -> Result<T, ApiError> {
        let query = UnitGroupQuery {
            lang: lang(locale),
            unit_group_code,
        };
        self.get_checked("/api/job/getDetailJobByLangAndUnitGroupCode", &query)
            .await
    }

    /// `GET /api/job/autoCompleteJobByLangAndUnitGroupTitle`
    pub async fn autocomplete_jobs<T: DeserializeOwned>(
        &self,
        locale: Option<Locale>,
        unit_group_title: &str,
    ) -> Result<T, ApiError> {
        let query = UnitGroupTitleQuery {
            lang: lang(locale),
            unit_group_title,
        };
        self.get_checked("/api/job/autoCompleteJobByLangAndUnitGroupTitle", &query)
            .await
    }
}
