//! Static preparation guides served alongside the blog.

use axum::extract::Path;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::error::ApiError;
use crate::response::ApiResponse;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GuideSection {
    pub heading: &'static str,
    pub body: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Guide {
    pub slug: &'static str,
    pub title: &'static str,
    pub summary: &'static str,
    pub reading_minutes: u8,
    pub sections: &'static [GuideSection],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GuideSummary {
    pub slug: &'static str,
    pub title: &'static str,
    pub summary: &'static str,
    pub reading_minutes: u8,
}

impl From<&Guide> for GuideSummary {
    fn from(guide: &Guide) -> Self {
        Self {
            slug: guide.slug,
            title: guide.title,
            summary: guide.summary,
            reading_minutes: guide.reading_minutes,
        }
    }
}

pub static GUIDES: [Guide; 4] = [
    Guide {
        slug: "agreement-divorce",
        title: "협의이혼 절차 안내",
        summary: "부부가 합의한 경우 가정법원을 통해 진행하는 협의이혼의 단계별 절차입니다.",
        reading_minutes: 5,
        sections: &[
            GuideSection {
                heading: "이혼의사확인 신청",
                body: "부부가 함께 관할 가정법원에 출석하여 협의이혼의사확인신청서를 제출합니다.",
            },
            GuideSection {
                heading: "이혼 안내와 숙려기간",
                body: "안내를 받은 뒤 미성년 자녀가 있으면 3개월, 없으면 1개월의 숙려기간을 거칩니다.",
            },
            GuideSection {
                heading: "자녀 양육 협의서",
                body: "미성년 자녀가 있다면 친권자, 양육자, 양육비, 면접교섭에 관한 협의서를 제출해야 합니다.",
            },
            GuideSection {
                heading: "확인기일과 신고",
                body: "확인기일에 의사가 확인되면 확인서등본을 받아 3개월 안에 행정관청에 이혼신고를 합니다.",
            },
        ],
    },
    Guide {
        slug: "mediation-and-litigation",
        title: "조정이혼과 재판이혼",
        summary: "합의가 어려울 때 거치는 조정 절차와 재판상 이혼의 흐름을 정리했습니다.",
        reading_minutes: 6,
        sections: &[
            GuideSection {
                heading: "조정 신청",
                body: "이혼 소송은 원칙적으로 조정을 먼저 거치며, 조정위원회가 양측의 합의를 돕습니다.",
            },
            GuideSection {
                heading: "재판상 이혼 사유",
                body: "민법 제840조가 정한 부정행위, 악의의 유기, 부당한 대우 등 사유를 입증해야 합니다.",
            },
            GuideSection {
                heading: "증거 준비",
                body: "메시지, 진단서, 금융거래 내역처럼 사실관계를 뒷받침하는 자료를 시간순으로 정리해두세요.",
            },
        ],
    },
    Guide {
        slug: "custody-and-child-support",
        title: "양육권과 양육비 준비",
        summary: "자녀의 복리를 기준으로 양육자와 양육비가 정해지는 방식을 살펴봅니다.",
        reading_minutes: 4,
        sections: &[
            GuideSection {
                heading: "양육자 지정 기준",
                body: "법원은 자녀의 나이, 양육 환경, 기존 주 양육자, 자녀의 의사 등을 종합해 판단합니다.",
            },
            GuideSection {
                heading: "양육비 산정기준표",
                body: "부모의 합산 소득 구간과 자녀의 나이, 자녀 수에 따라 표준 양육비가 정해집니다.",
            },
            GuideSection {
                heading: "이행 확보",
                body: "양육비를 지급하지 않으면 이행명령, 직접지급명령, 양육비이행관리원의 도움을 받을 수 있습니다.",
            },
        ],
    },
    Guide {
        slug: "property-division",
        title: "재산분할 체크리스트",
        summary: "혼인 중 형성한 재산을 파악하고 기여도를 정리하는 방법입니다.",
        reading_minutes: 5,
        sections: &[
            GuideSection {
                heading: "분할 대상 재산",
                body: "부동산, 예금, 주식, 퇴직금, 연금 등 혼인 중 함께 형성한 재산이 대상이며 채무도 포함됩니다.",
            },
            GuideSection {
                heading: "기여도 자료",
                body: "소득 내역, 가사와 육아 분담, 재산 형성 과정의 자금 출처를 보여주는 자료를 모아두세요.",
            },
            GuideSection {
                heading: "청구 기한",
                body: "재산분할청구권은 이혼한 날부터 2년이 지나면 소멸하므로 기한을 놓치지 않아야 합니다.",
            },
        ],
    },
];

pub fn find_guide(slug: &str) -> Option<&'static Guide> {
    GUIDES.iter().find(|guide| guide.slug == slug)
}

pub fn guides_router() -> Router {
    Router::new()
        .route("/api/guides", get(list_handler))
        .route("/api/guides/:slug", get(detail_handler))
}

async fn list_handler() -> Json<ApiResponse<Vec<GuideSummary>>> {
    Json(ApiResponse::ok(GUIDES.iter().map(GuideSummary::from).collect()))
}

async fn detail_handler(Path(slug): Path<String>) -> Result<Json<ApiResponse<Guide>>, ApiError> {
    let guide = find_guide(&slug)
        .ok_or_else(|| ApiError::NotFound("가이드를 찾을 수 없습니다.".to_string()))?;
    Ok(Json(ApiResponse::ok(*guide)))
}
