use crate::domain::{
    directory::DirectoryFacade,
    models::{CustomerSummary, DeviceSummary, Page},
};
use anyhow::Result;
use async_trait::async_trait;

/// Offline directory backed by a fixed data set. Used when no backend is
/// configured and by the layout verification binary.
pub struct DemoDirectory {
    customers: Vec<CustomerSummary>,
    devices: Vec<DeviceSummary>,
}

impl Default for DemoDirectory {
    fn default() -> Self {
        let customer = |id: &str, name: &str, email: &str| CustomerSummary {
            id: id.to_string(),
            name: name.to_string(),
            email: Some(email.to_string()),
            phone: None,
        };
        let device = |id: &str, serial: &str, model: &str, owner: &str| DeviceSummary {
            id: id.to_string(),
            serial_number: serial.to_string(),
            model: Some(model.to_string()),
            customer_name: Some(owner.to_string()),
        };

        Self {
            customers: vec![
                customer("c-1001", "Alice Martin", "alice.martin@northwind.test"),
                customer("c-1002", "Alicia Gomez", "agomez@harbor.test"),
                customer("c-1003", "Brightwater Clinic", "ops@brightwater.test"),
                customer("c-1004", "Contoso Logistics", "it@contoso.test"),
                customer("c-1005", "Dalton & Sons", "office@dalton.test"),
                customer("c-1006", "Evergreen School District", "helpdesk@evergreen.test"),
            ],
            devices: vec![
                device("d-2001", "SN-ALX-4410", "Copier X4", "Alice Martin"),
                device("d-2002", "SN-BWC-0092", "Sterilizer S2", "Brightwater Clinic"),
                device("d-2003", "SN-CTL-7781", "Forklift Scanner", "Contoso Logistics"),
                device("d-2004", "SN-CTL-7782", "Forklift Scanner", "Contoso Logistics"),
                device("d-2005", "SN-EVG-1200", "Projector P12", "Evergreen School District"),
            ],
        }
    }
}

fn matches(keyword: &str, fields: &[Option<&str>]) -> bool {
    let needle = keyword.to_lowercase();
    fields
        .iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(&needle))
}

fn paginate<T: Clone>(hits: Vec<&T>, page: u32, size: u32) -> Page<T> {
    let total = hits.len();
    let size = size.max(1) as usize;
    let content = hits
        .into_iter()
        .skip(page as usize * size)
        .take(size)
        .cloned()
        .collect();
    Page {
        content,
        total_elements: total as u64,
        total_pages: total.div_ceil(size) as u32,
        number: page,
        size: size as u32,
    }
}

#[async_trait]
impl DirectoryFacade for DemoDirectory {
    async fn search_customers(
        &self,
        keyword: &str,
        page: u32,
        size: u32,
    ) -> Result<Page<CustomerSummary>> {
        let hits = self
            .customers
            .iter()
            .filter(|c| matches(keyword, &[Some(&c.name), c.email.as_deref(), c.phone.as_deref()]))
            .collect();
        Ok(paginate(hits, page, size))
    }

    async fn search_devices(
        &self,
        keyword: &str,
        page: u32,
        size: u32,
    ) -> Result<Page<DeviceSummary>> {
        let hits = self
            .devices
            .iter()
            .filter(|d| {
                matches(
                    keyword,
                    &[
                        Some(&d.serial_number),
                        d.model.as_deref(),
                        d.customer_name.as_deref(),
                    ],
                )
            })
            .collect();
        Ok(paginate(hits, page, size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_keyword_search_is_case_insensitive() {
        let directory = DemoDirectory::default();
        let page = directory.search_customers("ALI", 0, 5).await.unwrap();
        let names: Vec<_> = page.content.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Alice Martin", "Alicia Gomez"]);
    }

    #[tokio::test]
    async fn test_page_size_is_honoured() {
        let directory = DemoDirectory::default();
        let page = directory.search_devices("sn-", 0, 2).await.unwrap();
        assert_eq!(page.content.len(), 2);
        assert_eq!(page.total_elements, 5);
        assert_eq!(page.total_pages, 3);

        let last = directory.search_devices("sn-", 2, 2).await.unwrap();
        assert_eq!(last.content.len(), 1);
        assert_eq!(last.content[0].serial_number, "SN-EVG-1200");
    }
}
