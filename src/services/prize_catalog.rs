use std::collections::BTreeMap;

use crate::models::{PrizeTemplate, PrizeTier, PrizeType};

/// 奖品目录：命中个数 -> 候选奖品，启动时构建，之后只读
#[derive(Debug, Clone)]
pub struct PrizeCatalog {
    tiers: BTreeMap<u32, Vec<PrizeTemplate>>,
}

impl Default for PrizeCatalog {
    fn default() -> Self {
        Self::builder()
            .tier(1, PrizeTemplate::new(PrizeType::Money, "Consolation Prize - 100 TG", 100))
            .tier(2, PrizeTemplate::new(PrizeType::Gift, "Electric Kettle", 0))
            .tier(3, PrizeTemplate::new(PrizeType::Money, "Small Cash Prize", 500))
            .tier(4, PrizeTemplate::new(PrizeType::Money, "Medium Cash Prize", 2000))
            .tier(5, PrizeTemplate::new(PrizeType::Travel, "Travel Voucher", 0))
            .tier(6, PrizeTemplate::new(PrizeType::Money, "Jackpot", 100_000))
            .build()
    }
}

impl PrizeCatalog {
    pub fn builder() -> PrizeCatalogBuilder {
        PrizeCatalogBuilder::default()
    }

    /// 某命中个数下的候选奖品；档位未定义或为空时返回 None
    pub fn candidates(&self, matches: u32) -> Option<&[PrizeTemplate]> {
        self.tiers
            .get(&matches)
            .map(Vec::as_slice)
            .filter(|c| !c.is_empty())
    }

    pub fn tiers(&self) -> Vec<PrizeTier> {
        self.tiers
            .iter()
            .map(|(matches, candidates)| PrizeTier {
                matches: *matches,
                candidates: candidates.clone(),
            })
            .collect()
    }
}

#[derive(Debug, Default)]
pub struct PrizeCatalogBuilder {
    tiers: BTreeMap<u32, Vec<PrizeTemplate>>,
}

impl PrizeCatalogBuilder {
    /// 向档位追加一个候选奖品（同一档位可多次调用）
    pub fn tier(mut self, matches: u32, template: PrizeTemplate) -> Self {
        self.tiers.entry(matches).or_default().push(template);
        self
    }

    pub fn build(self) -> PrizeCatalog {
        PrizeCatalog { tiers: self.tiers }
    }
}
