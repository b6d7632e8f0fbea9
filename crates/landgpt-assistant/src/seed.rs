//! Static legal FAQs loaded into a fresh store.

use landgpt_core::{faq::NewFaq, store::FaqStore};

pub fn sample_faqs() -> Vec<NewFaq> {
  vec![
    NewFaq::new(
      "Mutation ke liye application kaise karein?",
      "म्यूटेशन के लिए आवेदन की प्रक्रिया:
1. जिला कलेक्ट्रेट या तहसील कार्यालय जाएं
2. म्यूटेशन आवेदन फॉर्म भरें
3. आवश्यक दस्तावेज संलग्न करें: बिक्री पत्र, रसीद, आधार कार्ड
4. निर्धारित शुल्क का भुगतान करें
5. आवेदन जमा करने के बाद रसीद प्राप्त करें
6. 30 दिन में प्रक्रिया पूरी हो जाती है",
    )
    .category("mutation")
    .tags("mutation,application,process"),
    NewFaq::new(
      "Khasra number kya hota hai?",
      "खसरा नंबर का मतलब:
खसरा नंबर भूमि के एक टुकड़े का विशिष्ट पहचान संख्या है। यह:
- हर जमीन के प्लॉट का अलग नंबर होता है
- सरकारी रिकॉर्ड में जमीन की पहचान के लिए उपयोग होता है
- खतौनी में दर्ज होता है
- जमीन खरीदने-बेचने में जरूरी है",
    )
    .category("basic_terms")
    .tags("khasra,land_records,identification"),
    NewFaq::new(
      "Registry ke documents kya chahiye?",
      "रजिस्ट्री के लिए आवश्यक दस्तावेज:
1. मूल बिक्री पत्र (Sale Deed)
2. पुराना रजिस्ट्री दस्तावेज
3. खसरा/खतौनी की प्रति
4. आधार कार्ड (खरीदार और बेचने वाले का)
5. PAN कार्ड
6. NOC (यदि कोई लोन है)
7. फोटो
8. रजिस्ट्री फीस की रसीद",
    )
    .category("registry")
    .tags("registry,documents,required"),
  ]
}

/// Insert every sample FAQ. Existing entries are not checked, so running
/// this twice stores each question twice.
pub async fn load_sample_faqs<S: FaqStore>(store: &S) -> Result<usize, S::Error> {
  let faqs = sample_faqs();
  let total = faqs.len();
  for faq in faqs {
    store.insert(faq).await?;
  }
  tracing::info!(count = total, "loaded sample FAQs");
  Ok(total)
}

#[cfg(test)]
mod tests {
  use landgpt_store_sqlite::SqliteStore;

  use super::*;

  #[test]
  fn every_sample_is_valid_and_categorised() {
    for faq in sample_faqs() {
      assert!(faq.validate().is_ok());
      assert!(faq.category.is_some());
      assert_eq!(faq.language, "hindi");
    }
  }

  #[tokio::test]
  async fn loading_twice_duplicates() {
    let s = SqliteStore::open_in_memory().await.unwrap();
    assert_eq!(load_sample_faqs(&s).await.unwrap(), 3);
    load_sample_faqs(&s).await.unwrap();
    assert_eq!(s.count_faqs().await.unwrap(), 6);
  }
}
